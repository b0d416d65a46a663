//! Domain events reflecting committed pool mutations.
//!
//! Every successful ledger operation emits a [`PoolEvent`] through the
//! [`super::EventBus`]. Failed operations emit nothing. Events are
//! broadcast to WebSocket subscribers and optionally appended to the
//! PostgreSQL event log.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Identity, PoolName};

/// Domain event emitted after every committed mutation.
///
/// Amounts are stored as `String` to preserve u128 precision when
/// serialized to JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum PoolEvent {
    /// Emitted when a new pool is registered.
    PoolCreated {
        /// Pool name.
        pool: PoolName,
        /// Identity that created the pool.
        creator: Identity,
        /// Initial validator.
        validator: Identity,
        /// Creation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after a deposit has been taken into custody and credited.
    PoolFunded {
        /// Pool name.
        pool: PoolName,
        /// Depositor identity.
        funder: Identity,
        /// Deposited amount (string-encoded u128).
        amount: String,
        /// Pool balance after the deposit (string-encoded u128).
        new_balance: String,
        /// Timestamp of the deposit.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after the validator has been paid out.
    PoolWithdrawn {
        /// Pool name.
        pool: PoolName,
        /// Validator that received the funds.
        validator: Identity,
        /// Withdrawn amount (string-encoded u128).
        amount: String,
        /// Pool balance after the withdrawal (string-encoded u128).
        new_balance: String,
        /// Timestamp of the withdrawal.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when custody of a pool moves to a new validator.
    ValidatorTransferred {
        /// Pool name.
        pool: PoolName,
        /// Validator that gave up the role.
        previous_validator: Identity,
        /// Validator that now holds the role.
        new_validator: Identity,
        /// Timestamp of the handover.
        timestamp: DateTime<Utc>,
    },
}

impl PoolEvent {
    /// Returns the name of the pool this event concerns.
    #[must_use]
    pub fn pool(&self) -> &PoolName {
        match self {
            Self::PoolCreated { pool, .. }
            | Self::PoolFunded { pool, .. }
            | Self::PoolWithdrawn { pool, .. }
            | Self::ValidatorTransferred { pool, .. } => pool,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::PoolCreated { .. } => "pool_created",
            Self::PoolFunded { .. } => "pool_funded",
            Self::PoolWithdrawn { .. } => "pool_withdrawn",
            Self::ValidatorTransferred { .. } => "validator_transferred",
        }
    }

    /// Returns the time at which the mutation was committed.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::PoolCreated { timestamp, .. }
            | Self::PoolFunded { timestamp, .. }
            | Self::PoolWithdrawn { timestamp, .. }
            | Self::ValidatorTransferred { timestamp, .. } => *timestamp,
        }
    }
}
