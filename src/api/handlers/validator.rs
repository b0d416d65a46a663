//! Validator role handover.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::caller::caller_identity;
use crate::api::dto::{TransferValidatorRequest, TransferValidatorResponse, require_non_blank};
use crate::app_state::AppState;
use crate::domain::{Identity, PoolName};
use crate::error::{ErrorResponse, EscrowError};

/// `POST /pools/:name/validator` — Hand the validator role to someone else.
///
/// # Errors
///
/// Returns [`EscrowError`] if the pool is unknown, the caller is not the
/// validator, or the new validator is the current one.
#[utoipa::path(
    post,
    path = "/api/v1/pools/{name}/validator",
    tag = "Validators",
    summary = "Transfer the validator role",
    description = "Only the current validator may hand over the role, and only to a different identity.",
    params(
        ("name" = String, Path, description = "Pool name"),
        ("x-caller-identity" = String, Header, description = "Authenticated caller"),
    ),
    request_body = TransferValidatorRequest,
    responses(
        (status = 200, description = "Role transferred", body = TransferValidatorResponse),
        (status = 403, description = "Caller is not the validator", body = ErrorResponse),
        (status = 404, description = "Pool not found", body = ErrorResponse),
        (status = 409, description = "New validator equals current", body = ErrorResponse),
    )
)]
pub async fn transfer_validator(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    Json(req): Json<TransferValidatorRequest>,
) -> Result<impl IntoResponse, EscrowError> {
    let caller = caller_identity(&headers)?;
    let new_validator = require_non_blank("new_validator", &req.new_validator)?;
    let pool = PoolName::new(name);

    let view = state
        .ledger
        .transfer_validator(&pool, Identity::new(new_validator), &caller)
        .await?;

    Ok(Json(TransferValidatorResponse {
        pool,
        previous_validator: caller,
        validator: view.validator,
        transferred_at: view.last_modified_at,
    }))
}

/// Validator routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/pools/{name}/validator", post(transfer_validator))
}
