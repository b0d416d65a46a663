//! Pool ledger: enforces escrow invariants, moves funds through the asset
//! port, and emits events.

use std::sync::Arc;

use chrono::Utc;

use crate::asset::AssetTransferPort;
use crate::domain::{EventBus, Identity, Pool, PoolEvent, PoolName, PoolRegistry, PoolView};
use crate::error::EscrowError;

/// Orchestration layer for all escrow operations.
///
/// Owns references to the [`PoolRegistry`] for state, the
/// [`AssetTransferPort`] for moving value, and the [`EventBus`] for event
/// emission. Every mutation follows the pattern: acquire the pool's write
/// lock, check preconditions, move funds, commit, emit, return.
///
/// The pool lock is held across the asset transfer. Concurrent operations
/// on one pool are therefore fully serialized, and readers never observe a
/// balance whose transfer has not settled.
///
/// The two fund-moving operations settle differently:
///
/// - [`fund`](Self::fund) is conservative: the pool is credited only after
///   the asset has arrived in custody.
/// - [`withdraw`](Self::withdraw) debits first and restores the pool if the
///   payout fails.
#[derive(Debug, Clone)]
pub struct PoolLedger {
    registry: Arc<PoolRegistry>,
    port: Arc<dyn AssetTransferPort>,
    event_bus: EventBus,
}

impl PoolLedger {
    /// Creates a new `PoolLedger`.
    #[must_use]
    pub fn new(
        registry: Arc<PoolRegistry>,
        port: Arc<dyn AssetTransferPort>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            registry,
            port,
            event_bus,
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns a reference to the inner [`PoolRegistry`].
    #[must_use]
    pub fn registry(&self) -> &Arc<PoolRegistry> {
        &self.registry
    }

    /// Identifier of the escrowed asset.
    #[must_use]
    pub fn asset(&self) -> &str {
        self.port.asset()
    }

    /// Registers an empty pool under `name` with `validator` as custodian.
    ///
    /// No funds move. `caller` is recorded as the pool's creator.
    ///
    /// # Errors
    ///
    /// Returns [`EscrowError::AlreadyExists`] if the name is taken.
    pub async fn create_pool(
        &self,
        name: PoolName,
        validator: Identity,
        caller: Identity,
    ) -> Result<PoolView, EscrowError> {
        let pool = Pool::new(name, caller, validator);
        let view = pool.view();

        if let Err(err) = self.registry.insert(pool).await {
            tracing::debug!(pool = %view.name, error = %err, "pool creation rejected");
            return Err(err);
        }

        let _ = self.event_bus.publish(PoolEvent::PoolCreated {
            pool: view.name.clone(),
            creator: view.creator.clone(),
            validator: view.validator.clone(),
            timestamp: view.created_at,
        });

        tracing::info!(
            pool = %view.name,
            creator = %view.creator,
            validator = %view.validator,
            "pool created"
        );
        Ok(view)
    }

    /// Deposits `amount` from `caller` into the named pool.
    ///
    /// Any caller may fund any existing pool. The asset is pulled into
    /// custody first; the pool is credited only once that succeeds.
    /// Returns the new pool balance.
    ///
    /// # Errors
    ///
    /// - [`EscrowError::NotFound`] if the pool does not exist.
    /// - [`EscrowError::InvalidAmount`] if `amount` is zero.
    /// - [`EscrowError::BalanceOverflow`] if the credit would overflow.
    /// - [`EscrowError::TransferFailed`] if the asset did not move.
    pub async fn fund(
        &self,
        name: &PoolName,
        amount: u128,
        caller: &Identity,
    ) -> Result<u128, EscrowError> {
        let entry = self.registry.get(name).await?;
        let mut pool = entry.write().await;

        if amount == 0 {
            return Err(zero_amount());
        }
        // Holding the write lock until commit keeps this sum valid.
        let new_balance = pool.balance_after_credit(amount)?;

        if let Err(err) = self.port.transfer_in(caller, amount).await {
            tracing::warn!(
                pool = %name,
                caller = %caller,
                amount,
                error = %err,
                "deposit refused by asset"
            );
            return Err(err.into());
        }

        pool.apply_credit(amount, new_balance);
        drop(pool);

        let _ = self.event_bus.publish(PoolEvent::PoolFunded {
            pool: name.clone(),
            funder: caller.clone(),
            amount: amount.to_string(),
            new_balance: new_balance.to_string(),
            timestamp: Utc::now(),
        });

        tracing::info!(pool = %name, funder = %caller, amount, new_balance, "pool funded");
        Ok(new_balance)
    }

    /// Pays `amount` out of the named pool to its validator.
    ///
    /// The pool is debited before the payout; if the payout fails the pool
    /// is restored to its exact prior state. Returns the new pool balance.
    ///
    /// # Errors
    ///
    /// - [`EscrowError::NotFound`] if the pool does not exist.
    /// - [`EscrowError::Unauthorized`] if `caller` is not the validator.
    /// - [`EscrowError::InvalidAmount`] if `amount` is zero.
    /// - [`EscrowError::InsufficientBalance`] if `amount` exceeds the
    ///   balance.
    /// - [`EscrowError::TransferFailed`] if the payout did not go through.
    pub async fn withdraw(
        &self,
        name: &PoolName,
        amount: u128,
        caller: &Identity,
    ) -> Result<u128, EscrowError> {
        let entry = self.registry.get(name).await?;
        let mut pool = entry.write().await;

        if !pool.is_validator(caller) {
            tracing::warn!(pool = %name, caller = %caller, "withdrawal by non-validator rejected");
            return Err(EscrowError::Unauthorized {
                pool: name.clone(),
                caller: caller.clone(),
            });
        }
        if amount == 0 {
            return Err(zero_amount());
        }

        let before = pool.clone();
        let new_balance = pool.debit(amount)?;

        if let Err(err) = self.port.transfer_out(caller, amount).await {
            *pool = before;
            tracing::warn!(
                pool = %name,
                validator = %caller,
                amount,
                error = %err,
                "payout failed, pool debit reverted"
            );
            return Err(err.into());
        }
        drop(pool);

        let _ = self.event_bus.publish(PoolEvent::PoolWithdrawn {
            pool: name.clone(),
            validator: caller.clone(),
            amount: amount.to_string(),
            new_balance: new_balance.to_string(),
            timestamp: Utc::now(),
        });

        tracing::info!(pool = %name, validator = %caller, amount, new_balance, "pool withdrawn");
        Ok(new_balance)
    }

    /// Hands the validator role of the named pool to `new_validator`.
    ///
    /// Only the current validator may do this.
    ///
    /// # Errors
    ///
    /// - [`EscrowError::NotFound`] if the pool does not exist.
    /// - [`EscrowError::Unauthorized`] if `caller` is not the validator.
    /// - [`EscrowError::NoOpTransfer`] if `new_validator` already holds
    ///   the role.
    pub async fn transfer_validator(
        &self,
        name: &PoolName,
        new_validator: Identity,
        caller: &Identity,
    ) -> Result<PoolView, EscrowError> {
        let entry = self.registry.get(name).await?;
        let mut pool = entry.write().await;

        let previous = match pool.reassign_validator(caller, new_validator) {
            Ok(previous) => previous,
            Err(err) => {
                tracing::debug!(
                    pool = %name,
                    caller = %caller,
                    error = %err,
                    "validator transfer rejected"
                );
                return Err(err);
            }
        };
        let view = pool.view();
        drop(pool);

        let _ = self.event_bus.publish(PoolEvent::ValidatorTransferred {
            pool: name.clone(),
            previous_validator: previous.clone(),
            new_validator: view.validator.clone(),
            timestamp: view.last_modified_at,
        });

        tracing::info!(
            pool = %name,
            previous = %previous,
            validator = %view.validator,
            "validator transferred"
        );
        Ok(view)
    }

    /// Returns the committed state of the named pool, or `None` if it was
    /// never created.
    pub async fn get_pool(&self, name: &PoolName) -> Option<PoolView> {
        self.registry.view(name).await
    }

    /// Returns all pools ordered by name.
    pub async fn list_pools(&self) -> Vec<PoolView> {
        self.registry.list().await
    }

    /// Returns the number of registered pools.
    pub async fn pool_count(&self) -> usize {
        self.registry.len().await
    }
}

fn zero_amount() -> EscrowError {
    EscrowError::InvalidAmount("amount must be greater than zero".to_string())
}
