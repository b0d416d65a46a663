//! PostgreSQL implementation of the event log.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::EventStore;
use super::models::StoredEvent;
use crate::config::EscrowConfig;
use crate::domain::{PoolEvent, PoolName};
use crate::error::EscrowError;

const CREATE_EVENTS_TABLE: &str = "CREATE TABLE IF NOT EXISTS escrow_events (\
     id BIGSERIAL PRIMARY KEY, \
     pool_name TEXT NOT NULL, \
     event_type TEXT NOT NULL, \
     payload JSONB NOT NULL, \
     created_at TIMESTAMPTZ NOT NULL)";

const CREATE_EVENTS_INDEX: &str = "CREATE INDEX IF NOT EXISTS escrow_events_pool_created_idx \
     ON escrow_events (pool_name, created_at)";

type EventRow = (i64, String, String, serde_json::Value, DateTime<Utc>);

fn db_error(e: &sqlx::Error) -> EscrowError {
    EscrowError::PersistenceError(e.to_string())
}

/// PostgreSQL-backed event log using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresPersistence {
    pool: PgPool,
}

impl PostgresPersistence {
    /// Creates a new persistence layer with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized and timed from configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`EscrowError::PersistenceError`] if the database is
    /// unreachable within the configured timeout.
    pub async fn connect(config: &EscrowConfig) -> Result<Self, EscrowError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await
            .map_err(|e| db_error(&e))?;
        Ok(Self::new(pool))
    }

    /// Creates the `escrow_events` table and its index if missing.
    ///
    /// # Errors
    ///
    /// Returns a [`EscrowError::PersistenceError`] on database failure.
    pub async fn ensure_schema(&self) -> Result<(), EscrowError> {
        sqlx::query(CREATE_EVENTS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(&e))?;
        sqlx::query(CREATE_EVENTS_INDEX)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(&e))?;
        Ok(())
    }

    /// Appends an event to the event log.
    ///
    /// # Errors
    ///
    /// Returns a [`EscrowError::PersistenceError`] on database or
    /// serialization failure.
    pub async fn save_event(&self, event: &PoolEvent) -> Result<i64, EscrowError> {
        let payload = serde_json::to_value(event)
            .map_err(|e| EscrowError::PersistenceError(e.to_string()))?;

        sqlx::query_scalar::<_, i64>(
            "INSERT INTO escrow_events (pool_name, event_type, payload, created_at) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(event.pool().as_str())
        .bind(event.event_type_str())
        .bind(payload)
        .bind(event.timestamp())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error(&e))
    }

    /// Loads events after the given timestamp, optionally filtered by pool.
    ///
    /// # Errors
    ///
    /// Returns a [`EscrowError::PersistenceError`] on database failure.
    pub async fn load_events_after(
        &self,
        after: DateTime<Utc>,
        pool: Option<&PoolName>,
    ) -> Result<Vec<StoredEvent>, EscrowError> {
        let rows = if let Some(name) = pool {
            sqlx::query_as::<_, EventRow>(
                "SELECT id, pool_name, event_type, payload, created_at FROM escrow_events \
                 WHERE created_at > $1 AND pool_name = $2 ORDER BY id ASC",
            )
            .bind(after)
            .bind(name.as_str())
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, EventRow>(
                "SELECT id, pool_name, event_type, payload, created_at FROM escrow_events \
                 WHERE created_at > $1 ORDER BY id ASC",
            )
            .bind(after)
            .fetch_all(&self.pool)
            .await
        }
        .map_err(|e| db_error(&e))?;

        Ok(rows
            .into_iter()
            .map(
                |(id, pool_name, event_type, payload, created_at)| StoredEvent {
                    id,
                    pool_name,
                    event_type,
                    payload,
                    created_at,
                },
            )
            .collect())
    }
}

#[async_trait]
impl EventStore for PostgresPersistence {
    async fn append(&self, event: &PoolEvent) -> Result<i64, EscrowError> {
        self.save_event(event).await
    }
}
