//! pool-escrow server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use pool_escrow::api;
use pool_escrow::app_state::AppState;
use pool_escrow::config::{EscrowConfig, LogFormat};
use pool_escrow::persistence::{EventStore, PostgresPersistence, spawn_event_log_writer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config =
        EscrowConfig::from_env().map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().with_env_filter(filter).json().init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    tracing::info!(
        addr = %config.listen_addr,
        asset = %config.escrow_asset,
        custody = %config.custody_identity,
        "starting pool-escrow"
    );

    // Build application state
    let app_state = AppState::from_config(&config);

    // Mirror events into PostgreSQL
    if config.persistence_enabled {
        let store = PostgresPersistence::connect(&config)
            .await
            .context("connecting to PostgreSQL")?;
        store
            .ensure_schema()
            .await
            .context("creating escrow_events table")?;
        let store: Arc<dyn EventStore> = Arc::new(store);
        spawn_event_log_writer(store, app_state.event_bus.subscribe());
        tracing::info!("event log persistence enabled");
    }

    if config.faucet_enabled {
        tracing::warn!("asset faucet is enabled; anyone can mint");
    }

    // Build router
    let app = api::build_app(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
