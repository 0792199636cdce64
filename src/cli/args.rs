use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Seed benefit accounts and apply balance transfers
#[derive(Parser, Debug)]
#[command(name = "benefit-ledger")]
#[command(about = "Seed benefit accounts and apply balance transfers", long_about = None)]
pub struct CliArgs {
    /// Seed accounts CSV file path
    #[arg(value_name = "ACCOUNTS", help = "Path to the seed accounts CSV file")]
    pub accounts_file: PathBuf,

    /// Transfer commands CSV file path
    #[arg(value_name = "TRANSFERS", help = "Path to the transfer commands CSV file")]
    pub transfers_file: PathBuf,

    /// Store implementation to run the pipeline against
    #[arg(
        long = "store",
        value_name = "STORE",
        default_value = "sync",
        help = "Store implementation: 'sync' for single-threaded or 'async' for concurrent"
    )]
    pub store: StoreType,

    /// Bounded wait for a transfer's lock pair, in milliseconds
    #[arg(
        long = "lock-timeout-ms",
        value_name = "MILLIS",
        default_value_t = 500,
        help = "How long a transfer may wait for its account locks before failing busy"
    )]
    pub lock_timeout_ms: u64,
}

/// Available store implementations
#[derive(Clone, Debug, ValueEnum)]
pub enum StoreType {
    Sync,
    Async,
}

impl CliArgs {
    /// The lock timeout as a Duration
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}
