//! Fan-out of committed ledger mutations.
//!
//! The ledger publishes one [`PoolEvent`] per committed create, fund,
//! withdraw, or validator handover. WebSocket connections and the event
//! log writer each hold their own receiver.

use tokio::sync::broadcast;

use super::PoolEvent;

/// Broadcast bus for [`PoolEvent`]s.
///
/// Receivers that fall more than `capacity` events behind lose the oldest
/// ones and observe [`broadcast::error::RecvError::Lagged`].
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<PoolEvent>,
}

impl EventBus {
    /// Creates a bus buffering up to `capacity` events per receiver
    /// (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes `event`, returning how many receivers were handed it.
    ///
    /// With nobody listening the event is discarded; the ledger does not
    /// depend on delivery.
    pub fn publish(&self, event: PoolEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Opens a receiver for events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PoolEvent> {
        self.sender.subscribe()
    }
}
