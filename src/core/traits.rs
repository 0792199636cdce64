//! Core trait for the account store seam
//!
//! This module defines the narrow interface the CRUD/transport collaborator
//! is wired against. The dependency is passed in statically at construction
//! time; there is no runtime service discovery.

use crate::types::{Account, AccountId, LedgerError};
use rust_decimal::Decimal;

/// Trait for the account store behind the ledger
///
/// Provides the administrative operations plus the transfer operation. The
/// store is the sole arbiter of consistency: implementations must honor
/// per-account exclusive locking, canonical lock ordering, and atomic
/// commit of both sides of a transfer.
pub trait LedgerStore {
    /// All accounts, in ascending id order
    fn list(&self) -> Result<Vec<Account>, LedgerError>;

    /// Look up one account by id
    fn get(&self, id: AccountId) -> Result<Account, LedgerError>;

    /// Store a new account under a freshly assigned id (input id ignored)
    fn create(&self, account: Account) -> Result<Account, LedgerError>;

    /// Overwrite an existing account wholesale, preserving its id
    fn update(&self, id: AccountId, account: Account) -> Result<Account, LedgerError>;

    /// Delete an existing account
    fn remove(&self, id: AccountId) -> Result<(), LedgerError>;

    /// Atomically move `amount` from one account's balance to another's
    fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<(), LedgerError>;
}
