//! CLI module
//!
//! Command-line argument parsing for the benefit ledger binary.

pub mod args;

pub use args::{CliArgs, StoreType};

use clap::Parser;

/// Parse command-line arguments
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
