//! Asynchronous pipeline
//!
//! Seeds an `AsyncLedger` and fans the transfer commands out as tokio
//! tasks on a multi-threaded runtime. Commands are not applied in file
//! order: transfers over disjoint account pairs run fully in parallel,
//! and transfers sharing an account serialize on that account's lock.
//! Which commands get rejected for insufficient funds can therefore
//! differ from the synchronous pipeline when balances run tight; the
//! conservation and no-partial-commit guarantees hold regardless.

use crate::core::AsyncLedger;
use crate::io::csv_format::{read_account_seeds, write_accounts_csv};
use crate::io::reader::CommandReader;
use crate::strategy::PipelineStrategy;
use crate::types::{Account, LedgerError, TransferCommand};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Asynchronous pipeline
///
/// Owns its tokio runtime; the caller stays synchronous.
#[derive(Debug, Clone, Copy)]
pub struct AsyncPipeline {
    lock_timeout: Duration,
}

impl AsyncPipeline {
    pub fn new(lock_timeout: Duration) -> Self {
        AsyncPipeline { lock_timeout }
    }

    /// Apply all commands concurrently and surface the first fatal error
    async fn apply_commands(
        ledger: Arc<AsyncLedger>,
        commands: Vec<TransferCommand>,
    ) -> Result<(), LedgerError> {
        let mut handles = Vec::with_capacity(commands.len());
        for command in commands {
            let ledger = Arc::clone(&ledger);
            handles.push(tokio::spawn(async move {
                let result = ledger
                    .transfer(command.from, command.to, command.amount)
                    .await;
                (command, result)
            }));
        }

        for handle in handles {
            let (command, result) = handle
                .await
                .map_err(|e| LedgerError::storage(&format!("transfer task failed: {}", e)))?;

            if let Err(e) = result {
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

        Ok(())
    }
}

impl PipelineStrategy for AsyncPipeline {
    fn run(
        &self,
        accounts_path: &Path,
        commands_path: &Path,
        output: &mut dyn Write,
    ) -> Result<(), LedgerError> {
        let ledger = Arc::new(AsyncLedger::with_lock_timeout(self.lock_timeout));

        // Seed accounts in file order; ids are assigned 1, 2, ...
        for seed in read_account_seeds(accounts_path)? {
            let mut account = Account::new(0, &seed.name, &seed.description, seed.balance);
            account.active = seed.active;
            ledger.create(account);
        }

        // Commands are read synchronously up front so the runtime only
        // runs transfers, not CSV decoding
        let mut commands = Vec::new();
        for result in CommandReader::new(commands_path)? {
            match result {
                Ok(command) => commands.push(command),
                Err(e) if e.is_recoverable() => {
                    warn!(error = %e, "skipping malformed command row");
                }
                Err(e) => return Err(e),
            }
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| LedgerError::storage(&format!("failed to build runtime: {}", e)))?;

        let accounts = runtime.block_on(async {
            Self::apply_commands(Arc::clone(&ledger), commands).await?;
            Ok::<_, LedgerError>(ledger.list().await)
        })?;

        write_accounts_csv(&accounts, output)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DEFAULT_LOCK_TIMEOUT;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_pipeline_applies_transfer() {
        let accounts = create_temp_csv(
            "name,description,balance,active\n\
             meal,meal card,1000.00,true\n\
             transport,bus pass,500.00,true\n",
        );
        let commands = create_temp_csv("from,to,amount\n1,2,100.00\n");

        let pipeline = AsyncPipeline::new(DEFAULT_LOCK_TIMEOUT);
        let mut output = Vec::new();
        pipeline
            .run(accounts.path(), commands.path(), &mut output)
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("1,meal,meal card,900.00,true,0"));
        assert!(text.contains("2,transport,bus pass,600.00,true,0"));
    }

    #[test]
    fn test_pipeline_conserves_total_under_opposing_commands() {
        let accounts = create_temp_csv(
            "name,description,balance,active\n\
             a,,1000.00,true\n\
             b,,1000.00,true\n",
        );

        let mut command_text = String::from("from,to,amount\n");
        for i in 0..40 {
            if i % 2 == 0 {
                command_text.push_str("1,2,10.00\n");
            } else {
                command_text.push_str("2,1,10.00\n");
            }
        }
        let commands = create_temp_csv(&command_text);

        let pipeline = AsyncPipeline::new(DEFAULT_LOCK_TIMEOUT);
        let mut output = Vec::new();
        pipeline
            .run(accounts.path(), commands.path(), &mut output)
            .unwrap();

        // Equal counts in both directions leave both balances unchanged
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("1,a,,1000.00,true,0"));
        assert!(text.contains("2,b,,1000.00,true,0"));
    }

    #[test]
    fn test_pipeline_missing_commands_file_is_fatal() {
        let accounts = create_temp_csv("name,description,balance,active\n");

        let pipeline = AsyncPipeline::new(DEFAULT_LOCK_TIMEOUT);
        let mut output = Vec::new();
        let result = pipeline.run(accounts.path(), Path::new("nonexistent.csv"), &mut output);

        assert!(result.is_err());
    }
}
