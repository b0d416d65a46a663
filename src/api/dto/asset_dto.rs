//! Escrowed asset DTOs: balances, custody approvals, and the faucet.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Identity;

/// Response body for `GET /asset/balances/:identity`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AssetBalanceResponse {
    /// Holder identity.
    pub identity: Identity,
    /// Asset identifier.
    pub asset: String,
    /// Units held (string-encoded u128).
    pub balance: String,
    /// Units custody may still draw (string-encoded u128).
    pub custody_allowance: String,
}

/// Request body for `POST /asset/approve`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ApproveRequest {
    /// Allowance to grant custody, replacing any previous one.
    pub amount: String,
}

/// Response body for `POST /asset/approve`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApproveResponse {
    /// Owner that granted the allowance.
    pub owner: Identity,
    /// Custody account that may draw.
    pub spender: Identity,
    /// Granted allowance (string-encoded).
    pub amount: String,
}

/// Request body for `POST /asset/mint`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct MintRequest {
    /// Recipient of the new units.
    pub to: String,
    /// Units to issue (string-encoded u128).
    pub amount: String,
}

/// Response body for `POST /asset/mint`.
#[derive(Debug, Serialize, ToSchema)]
pub struct MintResponse {
    /// Recipient identity.
    pub to: Identity,
    /// Units issued (string-encoded).
    pub amount: String,
    /// Recipient balance after minting (string-encoded).
    pub new_balance: String,
}
