//! Asynchronous in-memory ledger store
//!
//! This module provides `AsyncLedger`, the concurrent counterpart of the
//! synchronous `Ledger`. Accounts live in `tokio::sync::Mutex` cells
//! inside a `DashMap`, so callers on a multi-threaded runtime can drive
//! many transfers at once without a global lock.
//!
//! # Design
//!
//! The same discipline as the sync store applies: same-account transfers
//! are rejected before any lock, the two account locks are acquired in
//! ascending-id order, and acquisition is bounded by a deadline that maps
//! to `Busy`. Membership changes are handled differently: `DashMap` has
//! no whole-map write lock for a transfer to hold, so a transfer
//! re-checks that both accounts are still present after acquiring their
//! locks, and `remove` takes the account's lock before deleting the
//! entry. A removal that wins the race therefore surfaces to the transfer
//! as `AccountNotFound`, never as a mutation of a detached record.

use crate::types::{Account, AccountId, LedgerError};
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::timeout_at;

use crate::core::ledger::DEFAULT_LOCK_TIMEOUT;

type AccountCell = Arc<Mutex<Account>>;

/// Concurrent in-memory account store
///
/// # Thread Safety
///
/// All methods take `&self` and may be called from many tasks at once.
/// Transfers over disjoint account pairs proceed fully in parallel;
/// transfers sharing an account serialize on that account's lock.
pub struct AsyncLedger {
    /// Account cells by id
    accounts: DashMap<AccountId, AccountCell>,

    /// Next id to assign on creation
    next_id: AtomicU64,

    /// Bounded wait for a transfer's lock pair
    lock_timeout: Duration,
}

impl AsyncLedger {
    /// Create an empty ledger with the default lock timeout
    pub fn new() -> Self {
        Self::with_lock_timeout(DEFAULT_LOCK_TIMEOUT)
    }

    /// Create an empty ledger with an explicit lock timeout
    pub fn with_lock_timeout(lock_timeout: Duration) -> Self {
        AsyncLedger {
            accounts: DashMap::new(),
            next_id: AtomicU64::new(1),
            lock_timeout,
        }
    }

    /// Clone out the lock cell for an account
    ///
    /// The `DashMap` shard guard is dropped before this returns, so the
    /// caller can await the cell's lock without holding any map lock.
    fn cell(&self, id: AccountId) -> Result<AccountCell, LedgerError> {
        self.accounts
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| LedgerError::account_not_found(id))
    }

    /// All accounts, in ascending id order
    pub async fn list(&self) -> Vec<Account> {
        let cells: Vec<AccountCell> = self
            .accounts
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        let mut accounts = Vec::with_capacity(cells.len());
        for cell in cells {
            accounts.push(cell.lock().await.clone());
        }
        accounts.sort_by_key(|account| account.id);
        accounts
    }

    /// Look up one account by id
    pub async fn get(&self, id: AccountId) -> Result<Account, LedgerError> {
        let cell = self.cell(id)?;
        let account = cell.lock().await.clone();
        Ok(account)
    }

    /// Store a new account under a freshly assigned id (input id ignored)
    pub fn create(&self, mut account: Account) -> Account {
        account.id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.accounts
            .insert(account.id, Arc::new(Mutex::new(account.clone())));
        account
    }

    /// Overwrite an existing account wholesale, preserving its id
    pub async fn update(
        &self,
        id: AccountId,
        mut account: Account,
    ) -> Result<Account, LedgerError> {
        let cell = self.cell(id)?;
        let mut guard = cell.lock().await;

        // The entry may have been removed while we waited for the lock
        if !self.accounts.contains_key(&id) {
            return Err(LedgerError::account_not_found(id));
        }

        account.id = id;
        *guard = account.clone();
        Ok(account)
    }

    /// Delete an existing account
    ///
    /// Acquires the account's lock first so the entry cannot vanish under
    /// an in-flight transfer that already holds it.
    pub async fn remove(&self, id: AccountId) -> Result<(), LedgerError> {
        let cell = self.cell(id)?;
        let _guard = cell.lock().await;

        self.accounts
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| LedgerError::account_not_found(id))
    }

    /// Atomically move `amount` from one account to another
    ///
    /// Same contract as the synchronous store: ascending-id lock order,
    /// bounded wait mapping to `Busy`, validation before mutation, both
    /// new balances computed before either write.
    pub async fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        // Never attempt to lock the same cell twice
        if from == to {
            return Err(LedgerError::same_account(from));
        }

        let from_cell = self.cell(from)?;
        let to_cell = self.cell(to)?;

        // Canonical ascending-id order prevents circular wait between
        // opposing transfers over the same pair
        let (low_cell, high_cell) = if from < to {
            (&from_cell, &to_cell)
        } else {
            (&to_cell, &from_cell)
        };

        let deadline = tokio::time::Instant::now() + self.lock_timeout;
        let low_guard = timeout_at(deadline, low_cell.lock())
            .await
            .map_err(|_| LedgerError::busy(from, to))?;
        let high_guard = timeout_at(deadline, high_cell.lock())
            .await
            .map_err(|_| LedgerError::busy(from, to))?;

        // A removal may have won the race while we waited for the locks
        if !self.accounts.contains_key(&from) {
            return Err(LedgerError::account_not_found(from));
        }
        if !self.accounts.contains_key(&to) {
            return Err(LedgerError::account_not_found(to));
        }

        let (mut debit, mut credit) = if from < to {
            (low_guard, high_guard)
        } else {
            (high_guard, low_guard)
        };

        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(amount));
        }
        if amount > debit.balance {
            return Err(LedgerError::insufficient_funds(from, debit.balance, amount));
        }

        // Compute both sides before writing either
        let debited = debit
            .balance
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("debit", from))?;
        let credited = credit
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("credit", to))?;

        debit.balance = debited;
        credit.balance = credited;

        Ok(())
    }
}

impl Default for AsyncLedger {
    fn default() -> Self {
        Self::new()
    }
}
