//! Service layer: escrow business logic.
//!
//! [`PoolLedger`] enforces the pool invariants, moves funds through the
//! [`crate::asset::AssetTransferPort`], and emits events through the
//! [`super::domain::EventBus`].

pub mod pool_ledger;

pub use pool_ledger::PoolLedger;
