//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::asset::{AssetTransferPort, InMemoryAsset};
use crate::config::EscrowConfig;
use crate::domain::{EventBus, Identity, PoolRegistry};
use crate::service::PoolLedger;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Pool ledger for all escrow logic.
    pub ledger: Arc<PoolLedger>,
    /// The escrowed asset, for balance queries, approvals, and the faucet.
    pub asset: Arc<InMemoryAsset>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
    /// Whether the mint faucet is open.
    pub faucet_enabled: bool,
}

impl AppState {
    /// Wires registry, asset, event bus, and ledger from configuration.
    #[must_use]
    pub fn from_config(config: &EscrowConfig) -> Self {
        let asset = Arc::new(InMemoryAsset::new(
            config.escrow_asset.clone(),
            Identity::new(config.custody_identity.clone()),
        ));
        let registry = Arc::new(PoolRegistry::new());
        let event_bus = EventBus::new(config.event_bus_capacity);
        let port: Arc<dyn AssetTransferPort> = Arc::clone(&asset) as Arc<dyn AssetTransferPort>;
        let ledger = Arc::new(PoolLedger::new(registry, port, event_bus.clone()));

        Self {
            ledger,
            asset,
            event_bus,
            faucet_enabled: config.faucet_enabled,
        }
    }
}
