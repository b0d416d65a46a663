//! Domain layer: core types, pool registry, and event system.
//!
//! This module contains the escrow domain model: pool names and caller
//! identities, the pool record with its balance and validator invariants,
//! the concurrent pool registry, and the event bus for broadcasting
//! committed state changes.

pub mod event_bus;
pub mod identity;
pub mod pool;
pub mod pool_event;
pub mod pool_name;
pub mod pool_registry;

pub use event_bus::EventBus;
pub use identity::Identity;
pub use pool::{Pool, PoolView};
pub use pool_event::PoolEvent;
pub use pool_name::PoolName;
pub use pool_registry::PoolRegistry;
