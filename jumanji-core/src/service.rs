use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;
use crate::booking::{Booking, BookingSubmission};
use crate::notification::{booking_message, ChatNotifier, Mailer, NotificationSettings};
use crate::repository::BookingRepository;
use crate::{BoxError, CoreError, CoreResult};

/// Returned to the guest after the whole pipeline succeeded.
pub const BOOKING_CONFIRMED_MESSAGE: &str = "Бронирование успешно отправлено!";

/// Steps of a booking submission, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    Persist,
    Chat,
    Email,
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStep::Persist => "persist",
            PipelineStep::Chat => "chat",
            PipelineStep::Email => "email",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct BookingReceipt {
    pub booking: Booking,
    /// Alert text that went to both staff channels.
    pub message: String,
}

/// Validates a submission, stores it, then alerts staff over chat and email.
///
/// Steps run strictly in order. Nothing is retried or rolled back: if a
/// notification fails the booking stays stored and the whole submission
/// reports failure.
pub struct BookingService {
    repo: Arc<dyn BookingRepository>,
    chat: Arc<dyn ChatNotifier>,
    mailer: Arc<dyn Mailer>,
    settings: NotificationSettings,
}

impl BookingService {
    pub fn new(
        repo: Arc<dyn BookingRepository>,
        chat: Arc<dyn ChatNotifier>,
        mailer: Arc<dyn Mailer>,
        settings: NotificationSettings,
    ) -> Self {
        Self { repo, chat, mailer, settings }
    }

    pub async fn submit_booking(&self, submission: BookingSubmission) -> CoreResult<BookingReceipt> {
        let new_booking = submission.validate()?;

        let booking = self
            .run_step(PipelineStep::Persist, None, self.repo.create(&new_booking))
            .await?;
        info!("Booking {} stored for {} guests on {} {}", booking.id, booking.guests, booking.date, booking.time);

        let message = booking_message(&booking);

        self.run_step(
            PipelineStep::Chat,
            Some(booking.id),
            self.chat.send_message(&self.settings.chat_id, &message),
        )
        .await?;

        self.run_step(
            PipelineStep::Email,
            Some(booking.id),
            self.mailer.send_mail(&self.settings.email_to, &self.settings.email_subject, &message),
        )
        .await?;

        info!("Booking {} announced to staff", booking.id);
        Ok(BookingReceipt { booking, message })
    }

    async fn run_step<T, F>(&self, step: PipelineStep, persisted: Option<Uuid>, fut: F) -> CoreResult<T>
    where
        F: Future<Output = Result<T, BoxError>>,
    {
        let source: BoxError = match tokio::time::timeout(self.settings.step_timeout, fut).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(e)) => e,
            Err(_) => format!("timed out after {:?}", self.settings.step_timeout).into(),
        };

        match persisted {
            Some(id) => error!("Booking pipeline {} step failed after booking {} was stored: {}", step, id, source),
            None => error!("Booking pipeline {} step failed: {}", step, source),
        }

        Err(CoreError::StepFailed { step, persisted, source })
    }
}
