#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Stored booking is malformed: {0}")]
    InvalidRecord(String),
    #[error("Telegram request failed: {0}")]
    TelegramHttp(#[from] reqwest::Error),
    #[error("Telegram rejected the message: {0}")]
    TelegramRejected(String),
    #[error("Email error: {0}")]
    Email(String),
}
