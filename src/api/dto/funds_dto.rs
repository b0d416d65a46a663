//! Funding, withdrawal, and validator transfer DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Identity, PoolName};

/// Request body for `POST /pools/:name/fund` and `/withdraw`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AmountRequest {
    /// Amount of the escrowed asset (string-encoded u128).
    pub amount: String,
}

/// Response body for `POST /pools/:name/fund`.
#[derive(Debug, Serialize, ToSchema)]
pub struct FundResponse {
    /// Pool name.
    pub pool: PoolName,
    /// Depositor identity.
    pub funded_by: Identity,
    /// Amount deposited (string-encoded).
    pub amount: String,
    /// Pool balance after the deposit (string-encoded).
    pub new_balance: String,
    /// Execution timestamp.
    pub executed_at: DateTime<Utc>,
}

/// Response body for `POST /pools/:name/withdraw`.
#[derive(Debug, Serialize, ToSchema)]
pub struct WithdrawResponse {
    /// Pool name.
    pub pool: PoolName,
    /// Validator that received the funds.
    pub recipient: Identity,
    /// Amount paid out (string-encoded).
    pub amount: String,
    /// Pool balance after the withdrawal (string-encoded).
    pub new_balance: String,
    /// Execution timestamp.
    pub executed_at: DateTime<Utc>,
}

/// Request body for `POST /pools/:name/validator`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TransferValidatorRequest {
    /// Identity that should take over custody.
    pub new_validator: String,
}

/// Response body for `POST /pools/:name/validator`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TransferValidatorResponse {
    /// Pool name.
    pub pool: PoolName,
    /// Validator that handed over the role.
    pub previous_validator: Identity,
    /// Validator that now holds the role.
    pub validator: Identity,
    /// Handover timestamp.
    pub transferred_at: DateTime<Utc>,
}
