use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use silverline_pricing::{
    app,
    cache::{start_cache_warmer, AppCache},
    config::Config,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("silverline_pricing=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env().context("loading configuration")?;

    let db = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("connecting to PostgreSQL")?;
    info!("Connected to PostgreSQL");

    let cache = AppCache::new(config.rate_cache_ttl);
    tokio::spawn(start_cache_warmer(
        cache.clone(),
        db.clone(),
        config.rate_cache_ttl,
    ));

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "Silverline pricing service listening");

    let state = AppState {
        db,
        cache,
        config: Arc::new(config),
    };

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
