//! Synchronous in-memory ledger store
//!
//! This module provides the `Ledger` struct, the sole arbiter of account
//! consistency. It holds every account behind its own exclusive lock and
//! commits transfers as atomic two-account mutations.
//!
//! # Locking discipline
//!
//! Each account lives in its own `Mutex` cell; the cells hang off a map
//! guarded by a `RwLock`. A transfer resolves both cells under the map
//! read lock and then acquires the two account locks in ascending-id
//! order, which rules out circular waits between transfers issued in
//! opposite directions. Lock acquisition is bounded: a transfer that
//! cannot take both locks before its deadline fails with `Busy` without
//! having touched either balance.
//!
//! Administrative `update` takes the same per-account lock, so it cannot
//! race an in-flight transfer. `remove` and `create` take the map write
//! lock, which excludes every transfer (transfers hold the read lock for
//! their full critical section).

use crate::core::traits::LedgerStore;
use crate::types::{Account, AccountId, LedgerError};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard, TryLockError};
use std::time::{Duration, Instant};

/// Default bounded wait for a transfer's lock pair
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_millis(500);

/// Poll interval while waiting on an account lock
const LOCK_RETRY_INTERVAL: Duration = Duration::from_micros(50);

type AccountCell = Arc<Mutex<Account>>;

/// Synchronous in-memory account store
///
/// `Ledger` maintains a map of account ids to lock cells and assigns ids
/// from a monotonic counter starting at 1 (0 is reserved as the "create"
/// sentinel of the administrative save operation).
///
/// # Thread Safety
///
/// All methods take `&self` and are safe to call from many threads at
/// once. Transfers over disjoint account pairs proceed in parallel;
/// transfers sharing an account serialize on that account's lock.
pub struct Ledger {
    /// Account cells by id; the outer lock serializes membership changes
    /// against in-flight transfers
    accounts: RwLock<HashMap<AccountId, AccountCell>>,

    /// Next id to assign on creation
    next_id: AtomicU64,

    /// Bounded wait for a transfer's lock pair
    lock_timeout: Duration,
}

impl Ledger {
    /// Create an empty ledger with the default lock timeout
    pub fn new() -> Self {
        Self::with_lock_timeout(DEFAULT_LOCK_TIMEOUT)
    }

    /// Create an empty ledger with an explicit lock timeout
    ///
    /// # Arguments
    ///
    /// * `lock_timeout` - How long a transfer may wait for its lock pair
    ///   before failing with `Busy`
    pub fn with_lock_timeout(lock_timeout: Duration) -> Self {
        Ledger {
            accounts: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            lock_timeout,
        }
    }

    fn read_map(&self) -> Result<RwLockReadGuard<'_, HashMap<AccountId, AccountCell>>, LedgerError> {
        self.accounts
            .read()
            .map_err(|_| LedgerError::storage("account map lock poisoned"))
    }

    fn write_map(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<AccountId, AccountCell>>, LedgerError> {
        self.accounts
            .write()
            .map_err(|_| LedgerError::storage("account map lock poisoned"))
    }

    /// Acquire an account lock before the deadline
    ///
    /// Returns `Ok(None)` when the deadline passes first; the caller maps
    /// that to `Busy` with the transfer's own context.
    fn lock_until<'a>(
        cell: &'a Mutex<Account>,
        deadline: Instant,
    ) -> Result<Option<MutexGuard<'a, Account>>, LedgerError> {
        loop {
            match cell.try_lock() {
                Ok(guard) => return Ok(Some(guard)),
                Err(TryLockError::Poisoned(_)) => {
                    return Err(LedgerError::storage("account lock poisoned"))
                }
                Err(TryLockError::WouldBlock) => {
                    if Instant::now() >= deadline {
                        return Ok(None);
                    }
                    std::thread::sleep(LOCK_RETRY_INTERVAL);
                }
            }
        }
    }

    fn lock_cell<'a>(cell: &'a AccountCell) -> Result<MutexGuard<'a, Account>, LedgerError> {
        cell.lock()
            .map_err(|_| LedgerError::storage("account lock poisoned"))
    }
}

impl LedgerStore for Ledger {
    /// All accounts, in ascending id order
    fn list(&self) -> Result<Vec<Account>, LedgerError> {
        let map = self.read_map()?;

        let mut accounts = Vec::with_capacity(map.len());
        for cell in map.values() {
            accounts.push(Self::lock_cell(cell)?.clone());
        }
        accounts.sort_by_key(|account| account.id);

        Ok(accounts)
    }

    fn get(&self, id: AccountId) -> Result<Account, LedgerError> {
        let map = self.read_map()?;
        let cell = map
            .get(&id)
            .ok_or_else(|| LedgerError::account_not_found(id))?;

        let account = Self::lock_cell(cell)?.clone();
        Ok(account)
    }

    /// Store a new account under a freshly assigned id
    ///
    /// The input id is ignored and overwritten with the next value of the
    /// monotonic counter.
    fn create(&self, mut account: Account) -> Result<Account, LedgerError> {
        let mut map = self.write_map()?;

        account.id = self.next_id.fetch_add(1, Ordering::Relaxed);
        map.insert(account.id, Arc::new(Mutex::new(account.clone())));

        Ok(account)
    }

    /// Overwrite an existing account wholesale
    ///
    /// Every field including the balance and version is replaced; only the
    /// id is preserved. Takes the account's exclusive lock, so the
    /// overwrite cannot interleave with an in-flight transfer.
    fn update(&self, id: AccountId, mut account: Account) -> Result<Account, LedgerError> {
        let map = self.read_map()?;
        let cell = map
            .get(&id)
            .ok_or_else(|| LedgerError::account_not_found(id))?;

        let mut guard = Self::lock_cell(cell)?;
        account.id = id;
        *guard = account.clone();

        Ok(account)
    }

    /// Delete an existing account
    ///
    /// Takes the map write lock, which waits out every in-flight transfer
    /// before the entry disappears.
    fn remove(&self, id: AccountId) -> Result<(), LedgerError> {
        let mut map = self.write_map()?;

        map.remove(&id)
            .map(|_| ())
            .ok_or_else(|| LedgerError::account_not_found(id))
    }

    /// Atomically move `amount` from one account to another
    ///
    /// Validation order: same-account identity (before any lock), account
    /// existence, then under both locks the amount sign and the source
    /// balance sufficiency. Both new balances are computed with checked
    /// arithmetic before either is written, so no failure path leaves a
    /// half-applied transfer.
    ///
    /// # Errors
    ///
    /// * `SameAccount` - `from` and `to` are the same identifier
    /// * `AccountNotFound` - either id does not resolve
    /// * `Busy` - the lock pair was not acquired within the bounded wait
    /// * `InvalidAmount` - `amount` is zero or negative
    /// * `InsufficientFunds` - `amount` exceeds the source balance
    /// * `ArithmeticOverflow` - a new balance is not representable
    fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        // Never attempt to lock the same cell twice
        if from == to {
            return Err(LedgerError::same_account(from));
        }

        let map = self.read_map()?;
        let from_cell = map
            .get(&from)
            .ok_or_else(|| LedgerError::account_not_found(from))?;
        let to_cell = map
            .get(&to)
            .ok_or_else(|| LedgerError::account_not_found(to))?;

        // Canonical ascending-id order prevents circular wait between
        // opposing transfers over the same pair
        let (low_cell, high_cell) = if from < to {
            (from_cell, to_cell)
        } else {
            (to_cell, from_cell)
        };

        let deadline = Instant::now() + self.lock_timeout;
        let Some(low_guard) = Self::lock_until(low_cell, deadline)? else {
            return Err(LedgerError::busy(from, to));
        };
        let Some(high_guard) = Self::lock_until(high_cell, deadline)? else {
            return Err(LedgerError::busy(from, to));
        };

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

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
