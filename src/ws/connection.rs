//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching incoming commands and forwarding filtered events.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::SubscriptionManager;
use crate::api::dto::PoolResponse;
use crate::domain::{PoolEvent, PoolName};
use crate::service::PoolLedger;

/// Wildcard pool name matching every pool.
const WILDCARD: &str = "*";

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and answers them.
/// - Forwards matching events from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(
    socket: WebSocket,
    mut event_rx: broadcast::Receiver<PoolEvent>,
    ledger: Arc<PoolLedger>,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = handle_text_message(&text, &mut subs, &ledger).await;
                        if let Some(resp_json) = response
                            && ws_tx.send(Message::text(resp_json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            event = event_rx.recv() => {
                match event {
                    Ok(pool_event) => {
                        if subs.matches(pool_event.pool()) {
                            let msg = WsMessage::new(
                                uuid::Uuid::new_v4().to_string(),
                                WsMessageType::Event,
                                serde_json::to_value(&pool_event).unwrap_or_default(),
                            );
                            let json = serde_json::to_string(&msg).unwrap_or_default();
                            if ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

/// Handles a text message from the client, returning an optional JSON response.
async fn handle_text_message(
    text: &str,
    subs: &mut SubscriptionManager,
    ledger: &PoolLedger,
) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return serde_json::to_string(&WsMessage::error(String::new(), 400, "malformed JSON"))
            .ok();
    };

    let Ok(command) = serde_json::from_value::<WsCommand>(msg.payload) else {
        return serde_json::to_string(&WsMessage::error(msg.id, 404, "unknown command")).ok();
    };

    let reply = match command {
        WsCommand::Subscribe { pools } => {
            let (names, wildcard) = split_wildcard(pools);
            subs.subscribe(&names, wildcard);
            WsMessage::new(
                msg.id,
                WsMessageType::Response,
                serde_json::json!({
                    "subscribed": names,
                    "count": subs.count(),
                    "wildcard": subs.is_subscribed_all(),
                }),
            )
        }
        WsCommand::Unsubscribe { pools } => {
            let (names, wildcard) = split_wildcard(pools);
            subs.unsubscribe(&names, wildcard);
            WsMessage::new(
                msg.id,
                WsMessageType::Response,
                serde_json::json!({
                    "unsubscribed": names,
                    "remaining_count": subs.count(),
                    "wildcard": subs.is_subscribed_all(),
                }),
            )
        }
        WsCommand::GetPool { pool } => {
            let name = PoolName::new(pool);
            match ledger.get_pool(&name).await {
                Some(view) => WsMessage::new(
                    msg.id,
                    WsMessageType::Response,
                    serde_json::to_value(PoolResponse::from_view(view, ledger.asset()))
                        .unwrap_or_default(),
                ),
                None => WsMessage::error(msg.id, 404, &format!("pool not found: {name}")),
            }
        }
    };

    serde_json::to_string(&reply).ok()
}

/// Separates the `"*"` wildcard from concrete pool names.
fn split_wildcard(pools: Vec<String>) -> (Vec<PoolName>, bool) {
    let mut wildcard = false;
    let mut names = Vec::with_capacity(pools.len());
    for pool in pools {
        if pool == WILDCARD {
            wildcard = true;
        } else {
            names.push(PoolName::new(pool));
        }
    }
    (names, wildcard)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::asset::InMemoryAsset;
    use crate::domain::{EventBus, Identity, PoolRegistry};

    fn make_ledger() -> PoolLedger {
        let asset = Arc::new(InMemoryAsset::new("USDC", Identity::new("custody")));
        PoolLedger::new(Arc::new(PoolRegistry::new()), asset, EventBus::new(16))
    }

    fn command(payload: serde_json::Value) -> String {
        serde_json::json!({
            "id": "req-1",
            "type": "command",
            "timestamp": chrono::Utc::now(),
            "payload": payload,
        })
        .to_string()
    }

    async fn reply(text: &str, subs: &mut SubscriptionManager, ledger: &PoolLedger) -> WsMessage {
        let Some(json) = handle_text_message(text, subs, ledger).await else {
            panic!("expected a reply");
        };
        let Ok(msg) = serde_json::from_str::<WsMessage>(&json) else {
            panic!("reply is not an envelope");
        };
        msg
    }

    #[test]
    fn split_wildcard_extracts_star() {
        let (names, wildcard) = split_wildcard(vec!["p1".to_string(), "*".to_string()]);
        assert!(wildcard);
        assert_eq!(names, vec![PoolName::new("p1")]);
    }

    #[tokio::test]
    async fn subscribe_updates_filter() {
        let ledger = make_ledger();
        let mut subs = SubscriptionManager::new();
        let text = command(serde_json::json!({ "command": "subscribe", "pools": ["p1"] }));

        let msg = reply(&text, &mut subs, &ledger).await;
        assert_eq!(msg.msg_type, WsMessageType::Response);
        assert_eq!(msg.id, "req-1");
        assert!(subs.matches(&PoolName::new("p1")));
    }

    #[tokio::test]
    async fn get_pool_returns_state_or_error() {
        let ledger = make_ledger();
        let _ = ledger
            .create_pool(PoolName::new("p1"), Identity::new("V1"), Identity::new("C"))
            .await;
        let mut subs = SubscriptionManager::new();

        let found = reply(
            &command(serde_json::json!({ "command": "get_pool", "pool": "p1" })),
            &mut subs,
            &ledger,
        )
        .await;
        assert_eq!(found.msg_type, WsMessageType::Response);
        assert_eq!(found.payload["validator"], "V1");

        let missing = reply(
            &command(serde_json::json!({ "command": "get_pool", "pool": "nope" })),
            &mut subs,
            &ledger,
        )
        .await;
        assert_eq!(missing.msg_type, WsMessageType::Error);
    }

    #[tokio::test]
    async fn malformed_json_yields_error() {
        let ledger = make_ledger();
        let mut subs = SubscriptionManager::new();
        let msg = reply("{not json", &mut subs, &ledger).await;
        assert_eq!(msg.msg_type, WsMessageType::Error);
    }
}
