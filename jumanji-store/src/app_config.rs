use serde::Deserialize;
use std::env;
use std::time::Duration;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub telegram: TelegramConfig,
    pub email: EmailConfig,
    pub notifications: NotificationsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding index.html and the landing page assets.
    pub public_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelegramConfig {
    pub token: String,
    pub chat_id: String,
    pub api_base: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    /// SMTP login, also used as the From address.
    pub username: String,
    pub password: String,
    pub recipient: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub subject: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotificationsConfig {
    pub step_timeout_seconds: u64,
}

impl NotificationsConfig {
    pub fn step_timeout(&self) -> Duration {
        Duration::from_secs(self.step_timeout_seconds)
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Self::defaults()?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(Self::environment())
            .build()?;

        s.try_deserialize()
    }

    /// Eg.. `JUMANJI__TELEGRAM__TOKEN=...` sets `telegram.token`.
    /// Values stay strings until deserialization so secrets such as
    /// `007123` keep their leading zeros.
    pub fn environment() -> config::Environment {
        config::Environment::with_prefix("JUMANJI").separator("__")
    }

    /// Builder preloaded with every setting that has a sensible default.
    /// Credentials and destinations have none and must be supplied.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000_i64)?
            .set_default("server.public_dir", "public")?
            .set_default("database.max_connections", 5_i64)?
            .set_default("database.acquire_timeout_seconds", 3_i64)?
            .set_default("telegram.api_base", "https://api.telegram.org")?
            .set_default("email.smtp_host", "smtp.gmail.com")?
            .set_default("email.smtp_port", 465_i64)?
            .set_default("email.subject", "Новое бронирование в Jumanji")?
            .set_default("notifications.step_timeout_seconds", 10_i64)
    }
}
