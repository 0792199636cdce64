//! Benefit Ledger CLI
//!
//! Command-line interface for seeding benefit accounts and applying
//! balance transfers from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- accounts.csv transfers.csv > final_accounts.csv
//! cargo run -- --store sync accounts.csv transfers.csv > final_accounts.csv
//! cargo run -- --store async --lock-timeout-ms 250 accounts.csv transfers.csv
//! ```
//!
//! The program seeds the ledger from the accounts CSV, applies every
//! transfer command from the transfers CSV through the selected store,
//! and writes the final account states to stdout. Rejected transfers are
//! logged and skipped; set `RUST_LOG=warn` (or finer) to see them.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Fatal error (missing arguments, unreadable file, storage fault)

use benefit_ledger::cli;
use benefit_ledger::strategy;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    let strategy = strategy::create_strategy(args.store.clone(), args.lock_timeout());

    // Final account states go to stdout
    let mut output = std::io::stdout();
    if let Err(e) = strategy.run(&args.accounts_file, &args.transfers_file, &mut output) {
        tracing::error!(error = %e, "pipeline failed");
        process::exit(1);
    }
}
