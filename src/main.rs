use anyhow::{Context, Result};
use homeinventory::{Config, RoomStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,homeinventory=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    tracing::debug!(?config, "configuration loaded");

    let store = RoomStore::connect(
        &config.database_url,
        config.max_connections,
        config.name_collation,
    )
    .await
    .context("failed to open room store")?;

    let app = homeinventory::app(store);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;
    tracing::info!("listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
