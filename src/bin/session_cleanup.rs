//! One-shot sweeper that deletes sessions older than the configured
//! duration. Expired sessions are never removed on the read path, so this
//! runs from cron (or by hand) to keep the table bounded.

use chrono::{Duration, Utc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use authgate::config::Config;
use authgate::db::connection::create_pool;
use authgate::repositories::session as session_repo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "session_cleanup=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    if config.session_duration_secs <= 0 {
        tracing::info!("sessions never expire; nothing to clean up");
        return Ok(());
    }

    let pool = create_pool(&config.database_url).await?;
    let cutoff = Utc::now() - Duration::seconds(config.session_duration_secs);
    let deleted = session_repo::delete_sessions_created_before(&pool, cutoff).await?;

    tracing::info!(deleted, %cutoff, "expired sessions removed");
    Ok(())
}
