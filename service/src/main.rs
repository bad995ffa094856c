#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

use std::sync::Arc;

use catalog_api::{
    app::build_app,
    catalog::{CatalogStore, InMemoryCatalog},
    config::Config,
    http::ApiKeyGate,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load and validate configuration first (fail-fast)
    let config = Config::load().map_err(|e| anyhow::anyhow!("{e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.level)?)
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "catalog-api starting up"
    );

    let store = if config.catalog.seed {
        InMemoryCatalog::seeded()
    } else {
        InMemoryCatalog::new()
    };
    tracing::info!(products = store.list()?.len(), "catalog ready");

    let gate = ApiKeyGate::from_config(&config.auth)?;
    let app = build_app(Arc::new(store), gate);

    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    tracing::info!(address = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
