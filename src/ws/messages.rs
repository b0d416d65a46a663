//! WebSocket message types: envelope and commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level WebSocket message envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsMessage {
    /// Client-provided ID for requests; server-generated for events.
    pub id: String,
    /// Message type discriminator.
    #[serde(rename = "type")]
    pub msg_type: WsMessageType,
    /// ISO-8601 timestamp.
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    pub payload: serde_json::Value,
}

impl WsMessage {
    /// Builds a server-originated message stamped with the current time.
    #[must_use]
    pub fn new(id: String, msg_type: WsMessageType, payload: serde_json::Value) -> Self {
        Self {
            id,
            msg_type,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Builds an error message carrying a numeric code.
    #[must_use]
    pub fn error(id: String, code: u32, message: &str) -> Self {
        Self::new(
            id,
            WsMessageType::Error,
            serde_json::json!({ "code": code, "message": message }),
        )
    }
}

/// Discriminator for WebSocket message types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WsMessageType {
    /// Client → Server command.
    Command,
    /// Server → Client response to a command.
    Response,
    /// Server → Client broadcast event.
    Event,
    /// Server → Client error.
    Error,
}

/// Commands a client can send in the payload of a `command` message.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum WsCommand {
    /// Subscribe to events for specific pools. Use `["*"]` for all pools.
    Subscribe {
        /// Pool names to subscribe to.
        pools: Vec<String>,
    },
    /// Unsubscribe from events for specific pools.
    Unsubscribe {
        /// Pool names to unsubscribe from.
        pools: Vec<String>,
    },
    /// Fetch the current committed state of a pool.
    GetPool {
        /// Target pool name.
        pool: String,
    },
}
