//! Asynchronous ledger store implementation
//!
//! Provides `AsyncLedger`, a concurrent store variant built on `DashMap`
//! and `tokio` synchronization primitives.

pub mod ledger;

pub use ledger::AsyncLedger;
