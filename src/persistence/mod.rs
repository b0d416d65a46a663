//! Persistence layer: PostgreSQL event log.
//!
//! The ledger stays authoritative in memory. Every committed
//! [`PoolEvent`](crate::domain::PoolEvent) can be mirrored into an
//! append-only table through the [`EventStore`] trait, driven by the
//! background writer in [`event_log`].

pub mod event_log;
pub mod models;
pub mod postgres;

use async_trait::async_trait;

use crate::domain::PoolEvent;
use crate::error::EscrowError;

pub use event_log::spawn_event_log_writer;
pub use postgres::PostgresPersistence;

/// Append-only sink for committed pool events.
#[async_trait]
pub trait EventStore: Send + Sync + std::fmt::Debug {
    /// Appends one event, returning the row ID assigned by the store.
    ///
    /// # Errors
    ///
    /// Returns [`EscrowError::PersistenceError`] if the event could not be
    /// written.
    async fn append(&self, event: &PoolEvent) -> Result<i64, EscrowError>;
}
