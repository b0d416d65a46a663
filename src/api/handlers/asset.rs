//! Escrowed asset handlers: balances, custody approval, dev faucet.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::caller::caller_identity;
use crate::api::dto::{
    ApproveRequest, ApproveResponse, AssetBalanceResponse, MintRequest, MintResponse,
    parse_amount, require_non_blank,
};
use crate::app_state::AppState;
use crate::domain::Identity;
use crate::error::{ErrorResponse, EscrowError};

/// `GET /asset/balances/:identity` — Holder balance and custody allowance.
///
/// Unknown holders report zero.
#[utoipa::path(
    get,
    path = "/api/v1/asset/balances/{identity}",
    tag = "Asset",
    summary = "Get asset balance",
    params(
        ("identity" = String, Path, description = "Holder identity"),
    ),
    responses(
        (status = 200, description = "Balance and allowance", body = AssetBalanceResponse),
    )
)]
pub async fn get_balance(
    State(state): State<AppState>,
    Path(identity): Path<String>,
) -> impl IntoResponse {
    let identity = Identity::new(identity);
    let balance = state.asset.balance_of(&identity).await;
    let allowance = state.asset.allowance(&identity).await;

    Json(AssetBalanceResponse {
        identity,
        asset: state.ledger.asset().to_string(),
        balance: balance.to_string(),
        custody_allowance: allowance.to_string(),
    })
}

/// `POST /asset/approve` — Let custody draw from the caller.
///
/// # Errors
///
/// Returns [`EscrowError`] on a missing caller or invalid amount.
#[utoipa::path(
    post,
    path = "/api/v1/asset/approve",
    tag = "Asset",
    summary = "Approve custody allowance",
    description = "Sets how much escrow custody may pull from the caller when funding pools. Replaces any earlier approval.",
    params(
        ("x-caller-identity" = String, Header, description = "Authenticated caller"),
    ),
    request_body = ApproveRequest,
    responses(
        (status = 200, description = "Allowance set", body = ApproveResponse),
        (status = 400, description = "Invalid amount", body = ErrorResponse),
        (status = 401, description = "Missing caller identity", body = ErrorResponse),
    )
)]
pub async fn approve(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ApproveRequest>,
) -> Result<impl IntoResponse, EscrowError> {
    let owner = caller_identity(&headers)?;
    let amount = parse_amount("amount", &req.amount)?;

    state.asset.approve(&owner, amount).await;

    Ok(Json(ApproveResponse {
        owner,
        spender: state.asset.custody().clone(),
        amount: amount.to_string(),
    }))
}

/// `POST /asset/mint` — Issue test units (faucet).
///
/// # Errors
///
/// Returns [`EscrowError::FaucetDisabled`] unless the faucet is enabled,
/// or [`EscrowError::InvalidAmount`] on a bad amount.
#[utoipa::path(
    post,
    path = "/api/v1/asset/mint",
    tag = "Asset",
    summary = "Mint test units",
    description = "Development faucet. Only available when ASSET_FAUCET_ENABLED is set.",
    request_body = MintRequest,
    responses(
        (status = 200, description = "Units issued", body = MintResponse),
        (status = 403, description = "Faucet disabled", body = ErrorResponse),
    )
)]
pub async fn mint(
    State(state): State<AppState>,
    Json(req): Json<MintRequest>,
) -> Result<impl IntoResponse, EscrowError> {
    if !state.faucet_enabled {
        return Err(EscrowError::FaucetDisabled);
    }
    let to = Identity::new(require_non_blank("to", &req.to)?);
    let amount = parse_amount("amount", &req.amount)?;

    let new_balance = state.asset.mint(&to, amount).await?;

    Ok(Json(MintResponse {
        to,
        amount: amount.to_string(),
        new_balance: new_balance.to_string(),
    }))
}

/// Asset routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/asset/balances/{identity}", get(get_balance))
        .route("/asset/approve", post(approve))
        .route("/asset/mint", post(mint))
}
