//! SMTP delivery of staff alerts using Lettre.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;
use jumanji_core::{BoxError, Mailer};
use crate::app_config::EmailConfig;
use crate::error::StoreError;

/// Sends plain-text email through an authenticated SMTP relay (implicit TLS).
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// # Errors
    ///
    /// Returns error if the relay host or the sender address is invalid.
    pub fn new(config: &EmailConfig) -> Result<Self, StoreError> {
        let from = config
            .username
            .parse::<Mailbox>()
            .map_err(|e| StoreError::Email(format!("Invalid from address: {e}")))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| StoreError::Email(format!("SMTP relay error: {e}")))?
            .port(config.smtp_port)
            .credentials(Credentials::new(config.username.clone(), config.password.clone()))
            .build();

        Ok(Self { transport, from })
    }

    fn build_message(&self, to: &str, subject: &str, body: &str) -> Result<Message, StoreError> {
        Message::builder()
            .from(self.from.clone())
            .to(to
                .parse()
                .map_err(|e| StoreError::Email(format!("Invalid to address: {e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| StoreError::Email(format!("Failed to build email: {e}")))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<(), BoxError> {
        let email = self.build_message(to, subject, body)?;

        self.transport
            .send(email)
            .await
            .map_err(|e| StoreError::Email(format!("Failed to send email: {e}")))?;

        info!("Email delivered to {}", to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lettre::Address;

    fn config() -> EmailConfig {
        EmailConfig {
            username: "bot@example.com".to_string(),
            password: "secret".to_string(),
            recipient: "staff@example.com".to_string(),
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 465,
            subject: "Новое бронирование в Jumanji".to_string(),
        }
    }

    #[tokio::test]
    async fn test_message_envelope() {
        let mailer = SmtpMailer::new(&config()).unwrap();
        let message = mailer
            .build_message("staff@example.com", "Новое бронирование в Jumanji", "body")
            .unwrap();

        let envelope = message.envelope();
        let staff: Address = "staff@example.com".parse().unwrap();
        let bot: Address = "bot@example.com".parse().unwrap();
        assert_eq!(envelope.to(), &[staff][..]);
        assert_eq!(envelope.from(), Some(&bot));
    }

    #[tokio::test]
    async fn test_bad_recipient_is_an_email_error() {
        let mailer = SmtpMailer::new(&config()).unwrap();
        let result = mailer.build_message("not an address", "s", "b");
        assert!(matches!(result, Err(StoreError::Email(_))));
    }

    #[test]
    fn test_bad_sender_rejected() {
        let mut cfg = config();
        cfg.username = "nobody".to_string();
        assert!(matches!(SmtpMailer::new(&cfg), Err(StoreError::Email(_))));
    }
}
