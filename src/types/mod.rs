//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: The benefit account entity and its identifier
//! - `record`: CSV-facing seed and transfer command records
//! - `error`: Error types for the benefit ledger

pub mod account;
pub mod error;
pub mod record;

pub use account::{Account, AccountId};
pub use error::LedgerError;
pub use record::{AccountSeed, AccountSeedRow, TransferCommand, TransferCommandRow};
