//! Pool-related DTOs for create, get, and list operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::PaginationMeta;
use crate::domain::{Identity, PoolName, PoolView};

/// Request body for `POST /pools`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePoolRequest {
    /// Caller-chosen pool name, unique across the ledger.
    pub name: String,
    /// Identity that will custody the pool.
    pub validator: String,
}

/// Pool state returned by create, get, and list endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct PoolResponse {
    /// Pool name.
    pub name: PoolName,
    /// Escrowed asset identifier.
    pub asset: String,
    /// Amount held in custody (string-encoded u128).
    pub balance: String,
    /// Identity that created the pool.
    pub creator: Identity,
    /// Identity currently allowed to withdraw.
    pub validator: Identity,
    /// Sum of all deposits (string-encoded u128).
    pub funded_total: String,
    /// Sum of all withdrawals (string-encoded u128).
    pub withdrawn_total: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last committed mutation.
    pub updated_at: DateTime<Utc>,
}

impl PoolResponse {
    /// Builds the wire representation of a pool view.
    #[must_use]
    pub fn from_view(view: PoolView, asset: &str) -> Self {
        Self {
            name: view.name,
            asset: asset.to_string(),
            balance: view.balance.to_string(),
            creator: view.creator,
            validator: view.validator,
            funded_total: view.funded_total.to_string(),
            withdrawn_total: view.withdrawn_total.to_string(),
            created_at: view.created_at,
            updated_at: view.last_modified_at,
        }
    }
}

/// Paginated list response for `GET /pools`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PoolListResponse {
    /// Pools on the requested page, ordered by name.
    pub data: Vec<PoolResponse>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}
