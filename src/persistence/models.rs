//! Database models for the event log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored event row from the `escrow_events` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredEvent {
    /// Auto-increment row ID.
    pub id: i64,
    /// Pool that generated the event.
    pub pool_name: String,
    /// Event type discriminator (e.g. `"pool_funded"`).
    pub event_type: String,
    /// JSONB payload with the full serialized event.
    pub payload: serde_json::Value,
    /// Commit timestamp of the mutation.
    pub created_at: DateTime<Utc>,
}
