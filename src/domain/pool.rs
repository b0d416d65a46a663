//! Escrow pool record and its read-only view.

use chrono::{DateTime, Utc};

use super::{Identity, PoolName};
use crate::error::EscrowError;

/// A named escrow record holding a balance of the escrowed asset.
///
/// Fields are private so that balance and validator changes only go
/// through the checked mutators below:
///
/// - `balance` grows only through [`Pool::credit`] and shrinks only through
///   [`Pool::debit`], which refuses to go below zero.
/// - `validator` changes only through [`Pool::reassign_validator`], which
///   requires the current validator and a different successor.
/// - `name` and `creator` never change after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    name: PoolName,
    balance: u128,
    creator: Identity,
    validator: Identity,
    created_at: DateTime<Utc>,
    last_modified_at: DateTime<Utc>,
    funded_total: u128,
    withdrawn_total: u128,
}

impl Pool {
    /// Creates an empty pool registered by `creator` and custodied by
    /// `validator`.
    #[must_use]
    pub fn new(name: PoolName, creator: Identity, validator: Identity) -> Self {
        let now = Utc::now();
        Self {
            name,
            balance: 0,
            creator,
            validator,
            created_at: now,
            last_modified_at: now,
            funded_total: 0,
            withdrawn_total: 0,
        }
    }

    /// Pool name.
    #[must_use]
    pub fn name(&self) -> &PoolName {
        &self.name
    }

    /// Amount currently held in custody for this pool.
    #[must_use]
    pub const fn balance(&self) -> u128 {
        self.balance
    }

    /// Identity that created the pool.
    #[must_use]
    pub fn creator(&self) -> &Identity {
        &self.creator
    }

    /// Identity currently allowed to withdraw and reassign the pool.
    #[must_use]
    pub fn validator(&self) -> &Identity {
        &self.validator
    }

    /// Returns `true` if `caller` is the current validator.
    #[must_use]
    pub fn is_validator(&self, caller: &Identity) -> bool {
        self.validator == *caller
    }

    /// Returns the balance the pool would hold after crediting `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`EscrowError::BalanceOverflow`] if the sum does not fit in
    /// a `u128`.
    pub fn balance_after_credit(&self, amount: u128) -> Result<u128, EscrowError> {
        self.balance
            .checked_add(amount)
            .ok_or(EscrowError::BalanceOverflow)
    }

    /// Adds `amount` to the balance and returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns [`EscrowError::BalanceOverflow`] if the balance would
    /// overflow. The pool is left untouched in that case.
    pub fn credit(&mut self, amount: u128) -> Result<u128, EscrowError> {
        let balance = self.balance_after_credit(amount)?;
        self.apply_credit(amount, balance);
        Ok(balance)
    }

    /// Records a deposit of `amount` whose resulting balance was obtained
    /// from [`Pool::balance_after_credit`] without releasing the pool in
    /// between.
    pub fn apply_credit(&mut self, amount: u128, new_balance: u128) {
        debug_assert_eq!(self.balance.checked_add(amount), Some(new_balance));
        self.balance = new_balance;
        self.funded_total = self.funded_total.saturating_add(amount);
        self.last_modified_at = Utc::now();
    }

    /// Subtracts `amount` from the balance and returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns [`EscrowError::InsufficientBalance`] if `amount` exceeds the
    /// current balance. The pool is left untouched in that case.
    pub fn debit(&mut self, amount: u128) -> Result<u128, EscrowError> {
        let balance =
            self.balance
                .checked_sub(amount)
                .ok_or(EscrowError::InsufficientBalance {
                    requested: amount,
                    available: self.balance,
                })?;
        self.balance = balance;
        self.withdrawn_total = self.withdrawn_total.saturating_add(amount);
        self.last_modified_at = Utc::now();
        Ok(balance)
    }

    /// Hands the validator role from `caller` to `new_validator`.
    ///
    /// Returns the previous validator.
    ///
    /// # Errors
    ///
    /// - [`EscrowError::Unauthorized`] if `caller` is not the current
    ///   validator.
    /// - [`EscrowError::NoOpTransfer`] if `new_validator` already holds the
    ///   role.
    pub fn reassign_validator(
        &mut self,
        caller: &Identity,
        new_validator: Identity,
    ) -> Result<Identity, EscrowError> {
        if !self.is_validator(caller) {
            return Err(EscrowError::Unauthorized {
                pool: self.name.clone(),
                caller: caller.clone(),
            });
        }
        if self.validator == new_validator {
            return Err(EscrowError::NoOpTransfer(new_validator));
        }
        self.last_modified_at = Utc::now();
        Ok(std::mem::replace(&mut self.validator, new_validator))
    }

    /// Captures the current state as a [`PoolView`].
    #[must_use]
    pub fn view(&self) -> PoolView {
        PoolView::from(self)
    }
}

/// Point-in-time copy of a pool's committed state, returned by queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolView {
    /// Pool name.
    pub name: PoolName,
    /// Amount held in custody.
    pub balance: u128,
    /// Identity that created the pool.
    pub creator: Identity,
    /// Identity currently authorized to withdraw.
    pub validator: Identity,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last committed mutation.
    pub last_modified_at: DateTime<Utc>,
    /// Sum of all successful deposits.
    pub funded_total: u128,
    /// Sum of all successful withdrawals.
    pub withdrawn_total: u128,
}

impl From<&Pool> for PoolView {
    fn from(pool: &Pool) -> Self {
        Self {
            name: pool.name.clone(),
            balance: pool.balance,
            creator: pool.creator.clone(),
            validator: pool.validator.clone(),
            created_at: pool.created_at,
            last_modified_at: pool.last_modified_at,
            funded_total: pool.funded_total,
            withdrawn_total: pool.withdrawn_total,
        }
    }
}
