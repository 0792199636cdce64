//! CSV-facing record types for the benefit ledger
//!
//! This module defines the raw rows read from the seed-account and
//! transfer-command CSV files, and their validated domain counterparts.
//! Raw rows keep amounts as strings so a malformed value fails the one
//! record instead of aborting deserialization of the whole file.

use crate::types::AccountId;
use crate::types::LedgerError;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// Raw seed-account row as deserialized from CSV
///
/// Matches the seed file format with columns: name, description, balance,
/// active. Identifiers are not part of the seed file; the store assigns
/// them on creation.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AccountSeedRow {
    pub name: String,
    pub description: String,
    pub balance: String,
    pub active: bool,
}

/// Validated seed for one account
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSeed {
    pub name: String,
    pub description: String,
    pub balance: Decimal,
    pub active: bool,
}

/// Raw transfer-command row as deserialized from CSV
///
/// Matches the command file format with columns: from, to, amount.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TransferCommandRow {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: String,
}

/// Validated transfer command
///
/// The amount has been parsed as a decimal; whether it is positive and covered
/// by the source balance is decided by the store, not the reader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferCommand {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: Decimal,
}

/// Convert an AccountSeedRow to an AccountSeed
///
/// Parses the balance string into a Decimal, trimming whitespace the way
/// amounts arrive in hand-edited CSV files.
///
/// # Arguments
///
/// * `row` - The deserialized seed row
///
/// # Returns
///
/// * `Ok(AccountSeed)` - Successfully converted seed
/// * `Err(LedgerError::Parse)` - The balance did not parse as a decimal
pub fn convert_seed_row(row: AccountSeedRow) -> Result<AccountSeed, LedgerError> {
    let balance = Decimal::from_str(row.balance.trim()).map_err(|_| LedgerError::Parse {
        line: None,
        message: format!("Invalid balance '{}' for account '{}'", row.balance, row.name),
    })?;

    Ok(AccountSeed {
        name: row.name,
        description: row.description,
        balance,
        active: row.active,
    })
}

/// Convert a TransferCommandRow to a TransferCommand
///
/// Parses the amount string into a Decimal. Sign and sufficiency checks
/// are deliberately left to the store so that the validation order of the
/// transfer operation stays in one place.
///
/// # Arguments
///
/// * `row` - The deserialized command row
///
/// # Returns
///
/// * `Ok(TransferCommand)` - Successfully converted command
/// * `Err(LedgerError::Parse)` - The amount did not parse as a decimal
pub fn convert_command_row(row: TransferCommandRow) -> Result<TransferCommand, LedgerError> {
    let amount = Decimal::from_str(row.amount.trim()).map_err(|_| LedgerError::Parse {
        line: None,
        message: format!(
            "Invalid amount '{}' for transfer {} -> {}",
            row.amount, row.from, row.to
        ),
    })?;

    Ok(TransferCommand {
        from: row.from,
        to: row.to,
        amount,
    })
}
