//! Concurrent pool storage with per-pool fine-grained locking.
//!
//! [`PoolRegistry`] stores every escrow pool in a `BTreeMap` where each
//! entry is individually protected by a [`tokio::sync::RwLock`]. This
//! allows concurrent reads on the same pool and concurrent writes on
//! different pools, while writes to the same pool are serialized.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::PoolName;
use super::pool::{Pool, PoolView};
use crate::error::EscrowError;

/// Central store for all escrow pools.
///
/// Uses a `RwLock<BTreeMap<...>>` for the outer map and per-entry
/// `Arc<RwLock<Pool>>` for per-pool locking. The outer lock is only held
/// for lookups and inserts, never while a pool lock is awaited, so a slow
/// operation on one pool cannot stall others.
///
/// Pools are never removed.
#[derive(Debug, Default)]
pub struct PoolRegistry {
    pools: RwLock<BTreeMap<PoolName, Arc<RwLock<Pool>>>>,
}

impl PoolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new pool under its name.
    ///
    /// The existence check and the insert happen under the same write
    /// lock, so two racing creations of one name cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns [`EscrowError::AlreadyExists`] if the name is taken. The
    /// existing record is left untouched.
    pub async fn insert(&self, pool: Pool) -> Result<(), EscrowError> {
        let mut map = self.pools.write().await;
        if map.contains_key(pool.name()) {
            return Err(EscrowError::AlreadyExists(pool.name().clone()));
        }
        map.insert(pool.name().clone(), Arc::new(RwLock::new(pool)));
        Ok(())
    }

    /// Returns the lock guarding the named pool.
    ///
    /// # Errors
    ///
    /// Returns [`EscrowError::NotFound`] if no pool has that name.
    pub async fn get(&self, name: &PoolName) -> Result<Arc<RwLock<Pool>>, EscrowError> {
        let map = self.pools.read().await;
        map.get(name)
            .map(Arc::clone)
            .ok_or_else(|| EscrowError::NotFound(name.clone()))
    }

    /// Returns the committed state of the named pool, or `None`.
    ///
    /// Waits for any in-flight mutation on that pool to finish, so the
    /// view never exposes a half-applied operation.
    pub async fn view(&self, name: &PoolName) -> Option<PoolView> {
        let entry = self.get(name).await.ok()?;
        let pool = entry.read().await;
        Some(pool.view())
    }

    /// Returns views of all pools ordered by name.
    pub async fn list(&self) -> Vec<PoolView> {
        let entries: Vec<Arc<RwLock<Pool>>> = {
            let map = self.pools.read().await;
            map.values().map(Arc::clone).collect()
        };
        let mut views = Vec::with_capacity(entries.len());
        for entry in entries {
            views.push(entry.read().await.view());
        }
        views
    }

    /// Returns the number of registered pools.
    pub async fn len(&self) -> usize {
        self.pools.read().await.len()
    }

    /// Returns `true` if no pool has been registered.
    pub async fn is_empty(&self) -> bool {
        self.pools.read().await.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Identity;

    fn make_pool(name: &str) -> Pool {
        Pool::new(
            PoolName::new(name),
            Identity::new("creator"),
            Identity::new("validator"),
        )
    }

    #[tokio::test]
    async fn insert_and_get() {
        let registry = PoolRegistry::new();
        assert!(registry.insert(make_pool("p1")).await.is_ok());

        let fetched = registry.get(&PoolName::new("p1")).await;
        let Ok(entry) = fetched else {
            panic!("pool not found");
        };
        assert_eq!(entry.read().await.balance(), 0);
    }

    #[tokio::test]
    async fn duplicate_insert_keeps_original() {
        let registry = PoolRegistry::new();
        let _ = registry.insert(make_pool("p1")).await;

        let second = Pool::new(
            PoolName::new("p1"),
            Identity::new("other-creator"),
            Identity::new("other-validator"),
        );
        let result = registry.insert(second).await;
        assert_eq!(result, Err(EscrowError::AlreadyExists(PoolName::new("p1"))));

        let Some(view) = registry.view(&PoolName::new("p1")).await else {
            panic!("pool missing");
        };
        assert_eq!(view.creator, Identity::new("creator"));
        assert_eq!(view.validator, Identity::new("validator"));
    }

    #[tokio::test]
    async fn get_nonexistent_returns_not_found() {
        let registry = PoolRegistry::new();
        let result = registry.get(&PoolName::new("ghost")).await;
        let Err(EscrowError::NotFound(name)) = result else {
            panic!("expected not found");
        };
        assert_eq!(name, PoolName::new("ghost"));
        assert!(registry.view(&PoolName::new("ghost")).await.is_none());
    }

    #[tokio::test]
    async fn list_is_ordered_by_name() {
        let registry = PoolRegistry::new();
        let _ = registry.insert(make_pool("charlie")).await;
        let _ = registry.insert(make_pool("alpha")).await;
        let _ = registry.insert(make_pool("bravo")).await;

        let names: Vec<String> = registry
            .list()
            .await
            .into_iter()
            .map(|v| v.name.to_string())
            .collect();
        assert_eq!(names, vec!["alpha", "bravo", "charlie"]);
    }

    #[tokio::test]
    async fn len_and_is_empty() {
        let registry = PoolRegistry::new();
        assert!(registry.is_empty().await);
        assert_eq!(registry.len().await, 0);

        let _ = registry.insert(make_pool("p1")).await;
        assert!(!registry.is_empty().await);
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn racing_creations_admit_exactly_one() {
        let registry = Arc::new(PoolRegistry::new());
        let mut handles = Vec::new();
        for i in 0..16 {
            let registry = Arc::clone(&registry);
            handles.push(tokio::spawn(async move {
                let pool = Pool::new(
                    PoolName::new("contested"),
                    Identity::new(format!("creator-{i}")),
                    Identity::new("validator"),
                );
                registry.insert(pool).await.is_ok()
            }));
        }
        let mut wins = 0;
        for handle in handles {
            if let Ok(true) = handle.await {
                wins += 1;
            }
        }
        assert_eq!(wins, 1);
        assert_eq!(registry.len().await, 1);
    }
}
