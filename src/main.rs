use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use authgate::config::Config;
use authgate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "authgate=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!(
        bind_addr = %config.bind_addr,
        session_name = ?config.session_name,
        session_duration_secs = config.session_duration_secs,
        session_store = %config.session_store.as_str(),
        auth_type = %config.auth_kind.as_str(),
        "Loaded configuration from environment/.env"
    );

    let state = AppState::build(config).await?;
    sqlx::migrate!("./migrations").run(&*state.pool).await?;

    let addr = state.config.bind_addr;
    let app = authgate::build_router(state);

    tracing::info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
