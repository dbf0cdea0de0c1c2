use async_trait::async_trait;
use std::time::Duration;
use crate::booking::Booking;
use crate::BoxError;

/// Staff-facing alert text, shared by the chat message and the email body.
pub fn booking_message(booking: &Booking) -> String {
    format!(
        "📌 Новое бронирование:\n👤 {}\n📞 {}\n👥 Гостей: {}\n📅 {} в {}",
        booking.name, booking.phone, booking.guests, booking.date, booking.time
    )
}

#[async_trait]
pub trait ChatNotifier: Send + Sync {
    /// Deliver `text` to the chat identified by `chat_id`
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), BoxError>;
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send a plain-text email
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<(), BoxError>;
}

/// Fixed destinations for staff alerts.
#[derive(Debug, Clone)]
pub struct NotificationSettings {
    pub chat_id: String,
    pub email_to: String,
    pub email_subject: String,
    /// Upper bound for each external call in the booking pipeline.
    pub step_timeout: Duration,
}
