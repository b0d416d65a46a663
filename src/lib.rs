//! # pool-escrow
//!
//! Escrow ledger of named funding pools, served over REST and WebSocket.
//!
//! Each pool is created once under a unique name, accepts deposits of a
//! single fungible asset from any caller, and releases funds only to its
//! current validator. The validator role can be handed over by its holder.
//! Token movements are delegated to an [`asset::AssetTransferPort`]; the
//! ledger only keeps the per-pool accounting consistent with it.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── PoolLedger (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── PoolRegistry (domain/)
//!     ├── AssetTransferPort (asset/)
//!     │
//!     └── PostgreSQL event log (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod asset;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod ws;
