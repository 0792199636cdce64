//! Synchronous pipeline
//!
//! Seeds a `Ledger` from the accounts file and applies transfer commands
//! one at a time, in file order. Commands go through the
//! `AccountRepository` facade, the same narrow surface a transport tier
//! would call.

use crate::core::{AccountRepository, Ledger};
use crate::io::csv_format::{read_account_seeds, write_accounts_csv};
use crate::io::reader::CommandReader;
use crate::strategy::PipelineStrategy;
use crate::types::{Account, LedgerError};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Synchronous pipeline
///
/// Single-threaded: each command is applied before the next is read, so
/// the output is deterministic for a given input.
#[derive(Debug, Clone, Copy)]
pub struct SyncPipeline {
    lock_timeout: Duration,
}

impl SyncPipeline {
    pub fn new(lock_timeout: Duration) -> Self {
        SyncPipeline { lock_timeout }
    }
}

impl PipelineStrategy for SyncPipeline {
    fn run(
        &self,
        accounts_path: &Path,
        commands_path: &Path,
        output: &mut dyn Write,
    ) -> Result<(), LedgerError> {
        let repository =
            AccountRepository::new(Arc::new(Ledger::with_lock_timeout(self.lock_timeout)));

        // Seed accounts in file order; ids are assigned 1, 2, ...
        for seed in read_account_seeds(accounts_path)? {
            let mut account = Account::new(0, &seed.name, &seed.description, seed.balance);
            account.active = seed.active;
            repository.create_account(account)?;
        }

        for result in CommandReader::new(commands_path)? {
            match result {
                Ok(command) => {
                    if let Err(e) = repository.transfer(command.from, command.to, command.amount) {
                        if !e.is_recoverable() {
                            return Err(e);
                        }
                        warn!(
                            from = command.from,
                            to = command.to,
                            amount = %command.amount,
                            error = %e,
                            "transfer rejected"
                        );
                    }
                }
                Err(e) if e.is_recoverable() => {
                    warn!(error = %e, "skipping malformed command row");
                }
                Err(e) => return Err(e),
            }
        }

        write_accounts_csv(&repository.list_accounts()?, output)?;

        Ok(())
    }
}
