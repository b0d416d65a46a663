//! Pool registry handlers: create, list, get.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::caller::caller_identity;
use crate::api::dto::{
    CreatePoolRequest, PaginationMeta, PaginationParams, PoolListResponse, PoolResponse,
    require_non_blank,
};
use crate::app_state::AppState;
use crate::domain::{Identity, PoolName};
use crate::error::{ErrorResponse, EscrowError};

/// `POST /pools` — Register a new escrow pool.
///
/// # Errors
///
/// Returns [`EscrowError`] on a missing caller, blank fields, or a taken
/// name.
#[utoipa::path(
    post,
    path = "/api/v1/pools",
    tag = "Pools",
    summary = "Create an escrow pool",
    description = "Registers an empty pool under a caller-chosen name with the given validator as custodian. The caller is recorded as creator. No funds move.",
    request_body = CreatePoolRequest,
    params(
        ("x-caller-identity" = String, Header, description = "Authenticated caller"),
    ),
    responses(
        (status = 201, description = "Pool created", body = PoolResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing caller identity", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse),
    )
)]
pub async fn create_pool(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreatePoolRequest>,
) -> Result<impl IntoResponse, EscrowError> {
    let caller = caller_identity(&headers)?;
    let name = require_non_blank("name", &req.name)?;
    let validator = require_non_blank("validator", &req.validator)?;

    let view = state
        .ledger
        .create_pool(PoolName::new(name), Identity::new(validator), caller)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PoolResponse::from_view(view, state.ledger.asset())),
    ))
}

/// `GET /pools` — List pools with pagination.
#[utoipa::path(
    get,
    path = "/api/v1/pools",
    tag = "Pools",
    summary = "List pools",
    description = "Returns a paginated list of all pools ordered by name.",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated pool list", body = PoolListResponse),
    )
)]
pub async fn list_pools(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> impl IntoResponse {
    let params = params.clamped();
    let views = state.ledger.list_pools().await;

    let total = u32::try_from(views.len()).unwrap_or(u32::MAX);
    let total_pages = if total == 0 {
        0
    } else {
        total.div_ceil(params.per_page)
    };

    let asset = state.ledger.asset();
    let data: Vec<PoolResponse> = views
        .into_iter()
        .skip(params.offset())
        .take(params.per_page as usize)
        .map(|view| PoolResponse::from_view(view, asset))
        .collect();

    Json(PoolListResponse {
        data,
        pagination: PaginationMeta {
            page: params.page,
            per_page: params.per_page,
            total,
            total_pages,
        },
    })
}

/// `GET /pools/:name` — Get pool state.
///
/// # Errors
///
/// Returns [`EscrowError::NotFound`] if the pool does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/pools/{name}",
    tag = "Pools",
    summary = "Get pool state",
    description = "Returns the latest committed balance, validator, and creator of a pool.",
    params(
        ("name" = String, Path, description = "Pool name"),
    ),
    responses(
        (status = 200, description = "Pool state", body = PoolResponse),
        (status = 404, description = "Pool not found", body = ErrorResponse),
    )
)]
pub async fn get_pool(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, EscrowError> {
    let name = PoolName::new(name);
    let found = state.ledger.get_pool(&name).await;
    let view = found.ok_or(EscrowError::NotFound(name))?;
    Ok(Json(PoolResponse::from_view(view, state.ledger.asset())))
}

/// Pool registry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pools", post(create_pool).get(list_pools))
        .route("/pools/{name}", get(get_pool))
}
