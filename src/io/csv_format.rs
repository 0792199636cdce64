//! CSV format handling for account seeds and account output
//!
//! This module centralizes the CSV formats of the pipeline:
//! - Seed file parsing (name, description, balance, active)
//! - Final account table output (id, name, description, balance, active,
//!   version)
//!
//! Seed parsing is strict: a malformed seed row aborts the run, since
//! seeding a ledger from a broken file would produce the wrong world
//! state. Transfer commands are the lenient side and live in `reader`.

use crate::types::record::convert_seed_row;
use crate::types::{Account, AccountSeed, AccountSeedRow, LedgerError};
use std::io::Write;
use std::path::Path;

/// Read and validate all account seeds from a CSV file
///
/// Expects columns: name, description, balance, active. Fails on the
/// first I/O, deserialization, or balance-parse error.
///
/// # Arguments
///
/// * `path` - Path to the seed CSV file
///
/// # Returns
///
/// * `Ok(Vec<AccountSeed>)` - All seeds, in file order
/// * `Err(LedgerError)` - The file could not be read or a row is malformed
pub fn read_account_seeds(path: &Path) -> Result<Vec<AccountSeed>, LedgerError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| LedgerError::Io {
            message: format!("Failed to open {}: {}", path.display(), e),
        })?;

    let mut seeds = Vec::new();
    for result in reader.deserialize::<AccountSeedRow>() {
        let row = result?;
        seeds.push(convert_seed_row(row)?);
    }

    Ok(seeds)
}

/// Write account states to CSV format
///
/// Writes accounts with columns: id, name, description, balance, active,
/// version. Balances are rendered with two decimal places and accounts
/// are sorted by id for deterministic output.
///
/// # Arguments
///
/// * `accounts` - Slice of account states to write
/// * `output` - Mutable reference to a writer for outputting CSV
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(LedgerError)` if a write error occurred
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["id", "name", "description", "balance", "active", "version"])?;

    let mut sorted_accounts = accounts.to_vec();
    sorted_accounts.sort_by_key(|account| account.id);

    for account in sorted_accounts {
        writer.write_record(&[
            account.id.to_string(),
            account.name,
            account.description,
            format!("{:.2}", account.balance),
            account.active.to_string(),
            account.version.to_string(),
        ])?;
    }

    writer.flush()?;

    Ok(())
}
