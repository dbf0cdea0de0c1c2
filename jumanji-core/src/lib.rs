pub mod booking;
pub mod notification;
pub mod repository;
pub mod service;

pub use booking::{Booking, BookingSubmission, GuestCount, NewBooking};
pub use notification::{ChatNotifier, Mailer, NotificationSettings};
pub use repository::BookingRepository;
pub use service::{BookingReceipt, BookingService, PipelineStep};

/// Error type returned by the external collaborators (store, chat, mail).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("{step} step failed: {source}")]
    StepFailed {
        step: PipelineStep,
        /// Id of the booking if the persist step had already succeeded.
        persisted: Option<uuid::Uuid>,
        #[source]
        source: BoxError,
    },
}

pub type CoreResult<T> = Result<T, CoreError>;
