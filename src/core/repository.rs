//! Account repository facade
//!
//! This module provides `AccountRepository`, the thin CRUD-facing API the
//! transport tier calls into. It holds no invariants of its own beyond
//! "does the id exist" - every consistency rule lives in the store behind
//! it. The store is injected at construction, so the repository works
//! against any `LedgerStore` implementation.

use crate::core::traits::LedgerStore;
use crate::types::{Account, AccountId, LedgerError};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Thin CRUD facade over a ledger store
///
/// Exposes the inbound API surface consumed by the (external) transport
/// layer: listing, lookup, create, update, delete, create-or-update save,
/// and transfer. All calls delegate to the injected store.
pub struct AccountRepository<S> {
    store: Arc<S>,
}

impl<S: LedgerStore> AccountRepository<S> {
    /// Wrap a store in the repository facade
    pub fn new(store: Arc<S>) -> Self {
        AccountRepository { store }
    }

    /// All accounts
    pub fn list_accounts(&self) -> Result<Vec<Account>, LedgerError> {
        self.store.list()
    }

    /// One account by id, or `AccountNotFound`
    pub fn get_account(&self, id: AccountId) -> Result<Account, LedgerError> {
        self.store.get(id)
    }

    /// Store a new account; the input id is ignored and overwritten
    pub fn create_account(&self, account: Account) -> Result<Account, LedgerError> {
        self.store.create(account)
    }

    /// Overwrite an existing account wholesale; `AccountNotFound` if the
    /// id does not exist
    pub fn update_account(&self, id: AccountId, account: Account) -> Result<Account, LedgerError> {
        self.store.update(id, account)
    }

    /// Delete an existing account; `AccountNotFound` otherwise
    pub fn delete_account(&self, id: AccountId) -> Result<(), LedgerError> {
        self.store.remove(id)
    }

    /// Create-or-update dispatch
    ///
    /// An id of 0 signals "create"; any other id must name an existing
    /// account, which is overwritten wholesale.
    pub fn save_account(&self, id: AccountId, account: Account) -> Result<Account, LedgerError> {
        if id == 0 {
            self.store.create(account)
        } else {
            self.store.update(id, account)
        }
    }

    /// Move `amount` between two accounts
    pub fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        self.store.transfer(from, to, amount)
    }
}

impl<S> Clone for AccountRepository<S> {
    fn clone(&self) -> Self {
        AccountRepository {
            store: Arc::clone(&self.store),
        }
    }
}
