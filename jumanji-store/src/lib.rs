pub mod app_config;
pub mod database;
pub mod booking_repo;
pub mod telegram;
pub mod mailer;
pub mod error;

pub use database::DbClient;
pub use booking_repo::PgBookingRepository;
pub use telegram::TelegramNotifier;
pub use mailer::SmtpMailer;
pub use error::StoreError;
