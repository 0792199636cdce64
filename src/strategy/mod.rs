//! Pipeline strategy module
//!
//! This module defines the Strategy pattern for the complete
//! seed-then-transfer pipeline, allowing the synchronous and asynchronous
//! store implementations to be selected at runtime.

use crate::cli::StoreType;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

pub mod r#async;
pub mod sync;

pub use self::r#async::AsyncPipeline;
pub use sync::SyncPipeline;

use crate::types::LedgerError;

/// Pipeline strategy trait
///
/// A pipeline seeds a ledger from the accounts file, applies every
/// transfer command from the commands file, and writes the final account
/// states to the output writer.
pub trait PipelineStrategy: Send + Sync {
    /// Run the pipeline
    ///
    /// # Arguments
    ///
    /// * `accounts_path` - Path to the seed accounts CSV file
    /// * `commands_path` - Path to the transfer commands CSV file
    /// * `output` - Writer for the final account states
    ///
    /// # Errors
    ///
    /// Fatal errors (unreadable files, storage faults) are returned.
    /// Recoverable per-command failures (validation rejections, busy
    /// contention, malformed rows) are logged at `warn` and processing
    /// continues with the next command.
    fn run(
        &self,
        accounts_path: &Path,
        commands_path: &Path,
        output: &mut dyn Write,
    ) -> Result<(), LedgerError>;
}

/// Create a pipeline strategy for the selected store type
///
/// # Arguments
///
/// * `store` - Which store implementation to run against
/// * `lock_timeout` - Bounded wait for a transfer's lock pair
pub fn create_strategy(store: StoreType, lock_timeout: Duration) -> Box<dyn PipelineStrategy> {
    match store {
        StoreType::Sync => Box::new(SyncPipeline::new(lock_timeout)),
        StoreType::Async => Box::new(AsyncPipeline::new(lock_timeout)),
    }
}
