//! System endpoints: health check and escrow asset info.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
    pools: usize,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, pool count, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            pools: state.ledger.pool_count().await,
        }),
    )
}

/// Escrowed asset description.
#[derive(Debug, Serialize, ToSchema)]
pub struct EscrowAssetInfo {
    asset: String,
    custody: String,
    faucet_enabled: bool,
}

/// `GET /config/escrow-asset` — Which asset this ledger escrows.
#[utoipa::path(
    get,
    path = "/config/escrow-asset",
    tag = "System",
    summary = "Escrowed asset",
    description = "Returns the identifier of the single asset held in escrow and the custody account that holds it.",
    responses(
        (status = 200, description = "Asset info", body = EscrowAssetInfo),
    )
)]
pub async fn escrow_asset_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(EscrowAssetInfo {
        asset: state.ledger.asset().to_string(),
        custody: state.asset.custody().to_string(),
        faucet_enabled: state.faucet_enabled,
    })
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/escrow-asset", get(escrow_asset_handler))
}
