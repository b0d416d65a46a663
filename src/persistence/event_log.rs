//! Background task mirroring the event bus into an [`EventStore`].

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use super::EventStore;
use crate::domain::PoolEvent;

/// Spawns a task that appends every received event to `store`.
///
/// Write failures are logged and skipped; the ledger is never blocked
/// on the log. The task ends when the event bus is closed.
pub fn spawn_event_log_writer(
    store: Arc<dyn EventStore>,
    mut rx: broadcast::Receiver<PoolEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if let Err(e) = store.append(&event).await {
                        tracing::warn!(
                            pool = %event.pool(),
                            event_type = event.event_type_str(),
                            error = %e,
                            "failed to persist event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(lagged = n, "event log writer lagged; events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        tracing::debug!("event log writer stopped");
    })
}
