//! Benefit Ledger Library
//! # Overview
//!
//! This library manages named monetary benefit accounts and performs
//! invariant-checked balance transfers between them.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, LedgerError, CSV records)
//! - [`cli`] - CLI arguments parsing
//! - [`crate::core`] - Business logic components:
//!   - [`crate::core::ledger`] - Synchronous in-memory store with ordered two-lock transfers
//!   - [`crate::core::r#async`] - Concurrent store variant on DashMap and tokio
//!   - [`crate::core::repository`] - Thin CRUD facade over a store
//! - [`io`] - CSV input/output handling
//! - [`strategy`] - Runtime-selectable sync/async pipelines
//!
//! # The transfer operation
//!
//! `transfer(from, to, amount)` is the consistency core. It rejects
//! same-account transfers before taking any lock, acquires both account
//! locks in ascending-id order (ruling out circular wait between opposing
//! transfers), bounds the wait with a deadline that maps to a `Busy`
//! failure, validates the amount sign and the source balance under lock,
//! and commits both sides or neither. Failures are a closed set of typed
//! conditions a caller can branch on:
//!
//! - `AccountNotFound`: an id does not resolve to an existing account
//! - `SameAccount`: source and destination are the same account
//! - `InvalidAmount`: the amount is zero or negative
//! - `InsufficientFunds`: the amount exceeds the source balance
//! - `Busy`: the lock pair was not acquired within the bounded wait

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use crate::core::{AccountRepository, AsyncLedger, Ledger, LedgerStore};
pub use crate::io::write_accounts_csv;
pub use crate::types::{Account, AccountId, LedgerError, TransferCommand};
