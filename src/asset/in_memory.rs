//! Token-style in-memory asset with balances, custody allowances, and a
//! mint faucet.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{AssetTransferPort, TransferError};
use crate::domain::Identity;

/// Balances and allowances of the asset, guarded as one unit.
#[derive(Debug, Default)]
struct Book {
    balances: HashMap<Identity, u128>,
    /// Amount each owner has approved custody to draw.
    allowances: HashMap<Identity, u128>,
    total_supply: u128,
}

impl Book {
    fn balance_of(&self, who: &Identity) -> u128 {
        self.balances.get(who).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: &Identity) -> u128 {
        self.allowances.get(owner).copied().unwrap_or(0)
    }

    /// Moves `amount` between two holders. Caller has checked `from`'s
    /// balance. Every balance is bounded by `total_supply`, so the credit
    /// cannot overflow.
    fn shift(&mut self, from: &Identity, to: &Identity, amount: u128) {
        let from_balance = self.balance_of(from).saturating_sub(amount);
        self.balances.insert(from.clone(), from_balance);
        let to_balance = self.balance_of(to).saturating_add(amount);
        self.balances.insert(to.clone(), to_balance);
    }
}

/// Fungible asset kept entirely in memory.
///
/// Models an allowance-based token: holders [`approve`](Self::approve)
/// the escrow custody account to draw a given amount, after which
/// [`AssetTransferPort::transfer_in`] may pull up to that amount. Custody
/// is an ordinary holder identified by `custody`.
///
/// The asset can be paused, in which case every transfer is rejected.
#[derive(Debug)]
pub struct InMemoryAsset {
    symbol: String,
    custody: Identity,
    book: Mutex<Book>,
    paused: AtomicBool,
}

impl InMemoryAsset {
    /// Creates an asset with no supply.
    #[must_use]
    pub fn new(symbol: impl Into<String>, custody: Identity) -> Self {
        Self {
            symbol: symbol.into(),
            custody,
            book: Mutex::new(Book::default()),
            paused: AtomicBool::new(false),
        }
    }

    /// Identity of the escrow custody account.
    #[must_use]
    pub fn custody(&self) -> &Identity {
        &self.custody
    }

    /// Issues `amount` new units to `to` and returns its new balance.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::Rejected`] if total supply would overflow.
    pub async fn mint(&self, to: &Identity, amount: u128) -> Result<u128, TransferError> {
        let mut book = self.book.lock().await;
        book.total_supply = book
            .total_supply
            .checked_add(amount)
            .ok_or_else(|| TransferError::Rejected("total supply overflow".to_string()))?;
        let balance = book.balance_of(to).saturating_add(amount);
        book.balances.insert(to.clone(), balance);
        tracing::debug!(asset = %self.symbol, to = %to, amount, "minted");
        Ok(balance)
    }

    /// Sets the amount custody may draw from `owner`, replacing any
    /// previous approval.
    pub async fn approve(&self, owner: &Identity, amount: u128) {
        let mut book = self.book.lock().await;
        book.allowances.insert(owner.clone(), amount);
        tracing::debug!(asset = %self.symbol, owner = %owner, amount, "custody allowance set");
    }

    /// Balance held by `who`.
    pub async fn balance_of(&self, who: &Identity) -> u128 {
        self.book.lock().await.balance_of(who)
    }

    /// Amount custody may still draw from `owner`.
    pub async fn allowance(&self, owner: &Identity) -> u128 {
        self.book.lock().await.allowance(owner)
    }

    /// Balance held by the custody account.
    pub async fn custody_balance(&self) -> u128 {
        self.book.lock().await.balance_of(&self.custody)
    }

    /// Total units ever minted.
    pub async fn total_supply(&self) -> u128 {
        self.book.lock().await.total_supply
    }

    /// Pauses or resumes all transfers.
    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::SeqCst);
    }

    /// Returns `true` while transfers are paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    fn ensure_active(&self) -> Result<(), TransferError> {
        if self.is_paused() {
            return Err(TransferError::Rejected(format!("{} is paused", self.symbol)));
        }
        Ok(())
    }
}

#[async_trait]
impl AssetTransferPort for InMemoryAsset {
    fn asset(&self) -> &str {
        &self.symbol
    }

    async fn transfer_in(&self, from: &Identity, amount: u128) -> Result<(), TransferError> {
        self.ensure_active()?;
        let mut book = self.book.lock().await;

        let approved = book.allowance(from);
        if approved < amount {
            return Err(TransferError::InsufficientAllowance {
                needed: amount,
                approved,
            });
        }
        let available = book.balance_of(from);
        if available < amount {
            return Err(TransferError::InsufficientFunds {
                needed: amount,
                available,
            });
        }

        book.allowances
            .insert(from.clone(), approved.saturating_sub(amount));
        book.shift(from, &self.custody, amount);
        Ok(())
    }

    async fn transfer_out(&self, to: &Identity, amount: u128) -> Result<(), TransferError> {
        self.ensure_active()?;
        let mut book = self.book.lock().await;

        let available = book.balance_of(&self.custody);
        if available < amount {
            return Err(TransferError::InsufficientCustody {
                needed: amount,
                available,
            });
        }
        book.shift(&self.custody, to, amount);
        Ok(())
    }
}
