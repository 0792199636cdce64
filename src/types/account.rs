//! Account-related types for the benefit ledger
//!
//! This module defines the Account entity and related functionality.
//! An account is the unit the ledger operates on: a named record holding
//! a decimal balance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account identifier
///
/// A monotonic surrogate key assigned by the store on creation and
/// immutable afterwards. Identifier 0 is never assigned; the
/// administrative `save` operation uses it to signal "create".
pub type AccountId = u64;

/// A benefit account
///
/// Represents one named monetary account. The balance is an
/// arbitrary-precision decimal and is never mutated except through an
/// administrative overwrite or a fully validated transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier, assigned on creation and immutable afterwards
    pub id: AccountId,

    /// Display name, free text with no uniqueness constraint
    pub name: String,

    /// Free-text description
    pub description: String,

    /// Current balance
    ///
    /// Never goes negative as a result of a transfer. Administrative
    /// updates overwrite it wholesale.
    pub balance: Decimal,

    /// Active flag
    ///
    /// Administrative metadata only; the transfer path does not consult it.
    pub active: bool,

    /// Version counter
    ///
    /// Inert metadata carried on the record. It is not read by the
    /// transfer path and is overwritten wholesale by administrative
    /// updates along with the rest of the record.
    pub version: u32,
}

impl Account {
    /// Create a new account record
    ///
    /// The record starts active with version 0. The id is normally
    /// overwritten by the store on creation.
    ///
    /// # Arguments
    ///
    /// * `id` - The account identifier
    /// * `name` - Display name
    /// * `description` - Free-text description
    /// * `balance` - Opening balance
    pub fn new(id: AccountId, name: &str, description: &str, balance: Decimal) -> Self {
        Account {
            id,
            name: name.to_string(),
            description: description.to_string(),
            balance,
            active: true,
            version: 0,
        }
    }
}
