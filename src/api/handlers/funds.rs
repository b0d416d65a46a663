//! Fund movement handlers: deposit into and withdraw from a pool.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::caller::caller_identity;
use crate::api::dto::{AmountRequest, FundResponse, WithdrawResponse, parse_amount};
use crate::app_state::AppState;
use crate::domain::PoolName;
use crate::error::{ErrorResponse, EscrowError};

/// `POST /pools/:name/fund` — Deposit into a pool.
///
/// # Errors
///
/// Returns [`EscrowError`] if the pool is unknown, the amount is invalid,
/// or the asset refuses the deposit.
#[utoipa::path(
    post,
    path = "/api/v1/pools/{name}/fund",
    tag = "Funds",
    summary = "Fund a pool",
    description = "Pulls the amount from the caller into escrow custody and credits the pool. Any caller may fund any pool. The caller must first approve custody for at least the amount.",
    params(
        ("name" = String, Path, description = "Pool name"),
        ("x-caller-identity" = String, Header, description = "Authenticated caller"),
    ),
    request_body = AmountRequest,
    responses(
        (status = 200, description = "Pool funded", body = FundResponse),
        (status = 400, description = "Invalid amount", body = ErrorResponse),
        (status = 404, description = "Pool not found", body = ErrorResponse),
        (status = 422, description = "Asset transfer refused", body = ErrorResponse),
    )
)]
pub async fn fund_pool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    Json(req): Json<AmountRequest>,
) -> Result<impl IntoResponse, EscrowError> {
    let caller = caller_identity(&headers)?;
    let amount = parse_amount("amount", &req.amount)?;
    let pool = PoolName::new(name);

    let new_balance = state.ledger.fund(&pool, amount, &caller).await?;

    Ok(Json(FundResponse {
        pool,
        funded_by: caller,
        amount: amount.to_string(),
        new_balance: new_balance.to_string(),
        executed_at: Utc::now(),
    }))
}

/// `POST /pools/:name/withdraw` — Pay out of a pool to its validator.
///
/// # Errors
///
/// Returns [`EscrowError`] if the pool is unknown, the caller is not the
/// validator, the balance is too low, or the payout fails.
#[utoipa::path(
    post,
    path = "/api/v1/pools/{name}/withdraw",
    tag = "Funds",
    summary = "Withdraw from a pool",
    description = "Releases the amount from escrow custody to the calling validator. A failed payout leaves the pool balance unchanged.",
    params(
        ("name" = String, Path, description = "Pool name"),
        ("x-caller-identity" = String, Header, description = "Authenticated caller"),
    ),
    request_body = AmountRequest,
    responses(
        (status = 200, description = "Funds released", body = WithdrawResponse),
        (status = 400, description = "Invalid amount", body = ErrorResponse),
        (status = 403, description = "Caller is not the validator", body = ErrorResponse),
        (status = 404, description = "Pool not found", body = ErrorResponse),
        (status = 422, description = "Insufficient balance or payout refused", body = ErrorResponse),
    )
)]
pub async fn withdraw_pool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    Json(req): Json<AmountRequest>,
) -> Result<impl IntoResponse, EscrowError> {
    let caller = caller_identity(&headers)?;
    let amount = parse_amount("amount", &req.amount)?;
    let pool = PoolName::new(name);

    let new_balance = state.ledger.withdraw(&pool, amount, &caller).await?;

    Ok(Json(WithdrawResponse {
        pool,
        recipient: caller,
        amount: amount.to_string(),
        new_balance: new_balance.to_string(),
        executed_at: Utc::now(),
    }))
}

/// Fund movement routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pools/{name}/fund", post(fund_pool))
        .route("/pools/{name}/withdraw", post(withdraw_pool))
}
