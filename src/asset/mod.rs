//! Asset transfer port: the boundary to the fungible asset being escrowed.
//!
//! The ledger never moves value itself. It asks an [`AssetTransferPort`]
//! to pull deposits into custody and to pay withdrawals out, and trusts
//! the port's answer as ground truth for whether the asset moved.
//! [`InMemoryAsset`] is the token-style implementation used by the gateway
//! binary and the tests.

pub mod in_memory;

pub use in_memory::InMemoryAsset;

use async_trait::async_trait;

use crate::domain::Identity;

/// Reasons an asset transfer can be refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    /// The sender does not hold enough of the asset.
    #[error("insufficient funds: needed {needed}, available {available}")]
    InsufficientFunds {
        /// Amount the transfer required.
        needed: u128,
        /// Amount the sender holds.
        available: u128,
    },

    /// The sender has not authorized custody to draw this much.
    #[error("insufficient allowance: needed {needed}, approved {approved}")]
    InsufficientAllowance {
        /// Amount the transfer required.
        needed: u128,
        /// Amount currently approved for custody.
        approved: u128,
    },

    /// Custody itself does not hold enough to pay out.
    #[error("insufficient custody balance: needed {needed}, available {available}")]
    InsufficientCustody {
        /// Amount the payout required.
        needed: u128,
        /// Amount held in custody.
        available: u128,
    },

    /// The asset refused the transfer for another reason.
    #[error("transfer rejected: {0}")]
    Rejected(String),
}

impl TransferError {
    /// Short machine-readable reason, used as error detail on the wire.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InsufficientFunds { .. } => "insufficient_funds",
            Self::InsufficientAllowance { .. } => "insufficient_allowance",
            Self::InsufficientCustody { .. } => "insufficient_custody",
            Self::Rejected(_) => "rejected",
        }
    }
}

/// Capability that moves the escrowed asset in and out of ledger custody.
///
/// Implementations must report success only once the underlying asset
/// state has actually changed, and must leave it unchanged when they
/// report failure.
#[async_trait]
pub trait AssetTransferPort: Send + Sync + std::fmt::Debug {
    /// Identifier of the escrowed asset (symbol or contract address).
    fn asset(&self) -> &str;

    /// Moves `amount` from `from` into ledger custody.
    ///
    /// # Errors
    ///
    /// Returns a [`TransferError`] if `from` lacks the balance or has not
    /// authorized custody to draw `amount`.
    async fn transfer_in(&self, from: &Identity, amount: u128) -> Result<(), TransferError>;

    /// Moves `amount` out of ledger custody to `to`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransferError`] if custody cannot cover the payout or
    /// the asset refuses the transfer.
    async fn transfer_out(&self, to: &Identity, amount: u128) -> Result<(), TransferError>;
}
