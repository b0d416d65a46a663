//! Per-connection subscription manager.
//!
//! Tracks which pools a WebSocket client is subscribed to and provides
//! server-side event filtering.

use std::collections::HashSet;

use crate::domain::PoolName;

/// Manages the set of pool subscriptions for a single WebSocket connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed pool names. If `subscribe_all` is true, this set is ignored.
    pools: HashSet<PoolName>,
    /// Whether the client subscribes to all pools (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds pools to the subscription set; `wildcard` enables all pools.
    pub fn subscribe(&mut self, pools: &[PoolName], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        self.pools.extend(pools.iter().cloned());
    }

    /// Removes pools from the subscription set. Clearing the wildcard
    /// requires unsubscribing from `"*"` explicitly.
    pub fn unsubscribe(&mut self, pools: &[PoolName], wildcard: bool) {
        if wildcard {
            self.subscribe_all = false;
        }
        for pool in pools {
            self.pools.remove(pool);
        }
    }

    /// Returns `true` if events of the given pool should be forwarded.
    #[must_use]
    pub fn matches(&self, pool: &PoolName) -> bool {
        self.subscribe_all || self.pools.contains(pool)
    }

    /// Returns the number of explicitly subscribed pools.
    #[must_use]
    pub fn count(&self) -> usize {
        self.pools.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}
