//! Escrow error types with HTTP status code mapping.
//!
//! [`EscrowError`] is the central error type for the ledger and the
//! gateway around it. Each variant maps to a specific HTTP status code and
//! structured JSON error response. Every ledger operation that returns an
//! error has left the ledger exactly as it found it, so callers may retry
//! once the triggering condition is fixed.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::asset::TransferError;
use crate::domain::{Identity, PoolName};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "pool not found: p1"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Ledger and gateway error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                         |
/// |-----------|-----------------|-------------------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request / 401 Unauthorized  |
/// | 2000–2999 | State/Role      | 404 / 409 Conflict / 403 Forbidden  |
/// | 3000–3999 | Server          | 500 / 403                           |
/// | 4000–4999 | Custody         | 422 Unprocessable Entity            |
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EscrowError {
    /// A pool with this name is already registered.
    #[error("pool already exists: {0}")]
    AlreadyExists(PoolName),

    /// No pool with this name is registered.
    #[error("pool not found: {0}")]
    NotFound(PoolName),

    /// The caller does not hold the validator role of the pool.
    #[error("{caller} is not the validator of pool {pool}")]
    Unauthorized {
        /// Pool the caller tried to act on.
        pool: PoolName,
        /// Identity that made the call.
        caller: Identity,
    },

    /// Withdrawal amount exceeds the recorded pool balance.
    #[error("insufficient pool balance: requested {requested}, available {available}")]
    InsufficientBalance {
        /// Amount the validator asked for.
        requested: u128,
        /// Balance held by the pool.
        available: u128,
    },

    /// The proposed validator already holds the role.
    #[error("{0} is already the validator")]
    NoOpTransfer(Identity),

    /// The asset transfer port refused to move the funds.
    #[error("asset transfer failed: {0}")]
    TransferFailed(#[from] TransferError),

    /// Amount is zero or not a valid unsigned integer.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Crediting the pool would overflow its balance.
    #[error("pool balance would overflow")]
    BalanceOverflow,

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request carried no caller identity.
    #[error("missing caller identity")]
    MissingCaller,

    /// The development faucet is switched off.
    #[error("asset faucet is disabled")]
    FaucetDisabled,

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl EscrowError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidAmount(_) => 1002,
            Self::MissingCaller => 1003,
            Self::NotFound(_) => 2001,
            Self::AlreadyExists(_) => 2002,
            Self::Unauthorized { .. } => 2003,
            Self::NoOpTransfer(_) => 2004,
            Self::Internal(_) => 3000,
            Self::PersistenceError(_) => 3001,
            Self::FaucetDisabled => 3002,
            Self::InsufficientBalance { .. } => 4001,
            Self::TransferFailed(_) => 4002,
            Self::BalanceOverflow => 4003,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidAmount(_) => StatusCode::BAD_REQUEST,
            Self::MissingCaller => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyExists(_) | Self::NoOpTransfer(_) => StatusCode::CONFLICT,
            Self::Unauthorized { .. } | Self::FaucetDisabled => StatusCode::FORBIDDEN,
            Self::InsufficientBalance { .. } | Self::TransferFailed(_) | Self::BalanceOverflow => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::PersistenceError(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for EscrowError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let details = match &self {
            Self::TransferFailed(err) => Some(err.reason().to_string()),
            _ => None,
        };
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
