use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use anyhow::Context;
use jumanji_api::{app, AppState};
use jumanji_core::{BookingService, NotificationSettings};
use jumanji_store::app_config::Config;
use jumanji_store::{DbClient, PgBookingRepository, SmtpMailer, TelegramNotifier};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const MIGRATION_RETRY_INTERVAL: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "jumanji_api=debug,jumanji_core=debug,jumanji_store=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Jumanji booking service on port {}", config.server.port);

    // An unreachable database must not keep the landing page down.
    let db = match DbClient::new(&config.database).await {
        Ok(db) => {
            tracing::info!("Database connected");
            if let Err(e) = db.migrate().await {
                tracing::error!("Database migration failed: {}", e);
            }
            db
        }
        Err(e) => {
            tracing::error!("Database connection failed, bookings will fail until it is reachable and migrated: {}", e);
            let db = DbClient::lazy(&config.database).context("Invalid database url")?;
            let migrator = db.clone();
            tokio::spawn(async move {
                migrator.migrate_when_ready(MIGRATION_RETRY_INTERVAL).await;
            });
            db
        }
    };

    let repo = Arc::new(PgBookingRepository::new(db.pool.clone()));
    let chat = Arc::new(TelegramNotifier::new(&config.telegram.api_base, &config.telegram.token));
    let mailer = Arc::new(SmtpMailer::new(&config.email).context("Failed to configure mailer")?);

    let bookings = BookingService::new(
        repo,
        chat,
        mailer,
        NotificationSettings {
            chat_id: config.telegram.chat_id.clone(),
            email_to: config.email.recipient.clone(),
            email_subject: config.email.subject.clone(),
            step_timeout: config.notifications.step_timeout(),
        },
    );

    let app_state = AppState {
        bookings: Arc::new(bookings),
        public_dir: PathBuf::from(&config.server.public_dir),
    };

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid listen address")?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(app_state)).await?;

    Ok(())
}
