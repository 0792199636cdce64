//! Core business logic module
//!
//! This module contains the ledger's consistency core:
//! - `traits` - The store seam the CRUD facade is wired against
//! - `ledger` - Synchronous in-memory store with ordered two-lock transfers
//! - `repository` - Thin CRUD facade over a store
//! - `async` - Asynchronous store variant

pub mod r#async;
pub mod ledger;
pub mod repository;
pub mod traits;

pub use ledger::{Ledger, DEFAULT_LOCK_TIMEOUT};
pub use r#async::AsyncLedger;
pub use repository::AccountRepository;
pub use traits::LedgerStore;
