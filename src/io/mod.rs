//! I/O module
//!
//! CSV handling for the benefit ledger:
//! - `csv_format` - Seed parsing and account output formatting
//! - `reader` - Streaming transfer-command reader

pub mod csv_format;
pub mod reader;

pub use csv_format::{read_account_seeds, write_accounts_csv};
pub use reader::CommandReader;
