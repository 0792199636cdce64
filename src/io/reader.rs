//! Streaming transfer-command reader
//!
//! This module provides `CommandReader`, an iterator over the transfer
//! commands of a CSV file. Each row yields its own `Result`, so the
//! pipeline can log and skip a malformed command and keep going with the
//! rest of the file.

use crate::types::record::convert_command_row;
use crate::types::{LedgerError, TransferCommand, TransferCommandRow};
use std::fs::File;
use std::path::Path;

/// Iterator over transfer commands from a CSV file
///
/// Expects columns: from, to, amount. Deserialization and amount-parse
/// failures are reported per row; only opening the file can fail
/// up front.
pub struct CommandReader {
    records: csv::DeserializeRecordsIntoIter<File, TransferCommandRow>,
}

impl std::fmt::Debug for CommandReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandReader").finish_non_exhaustive()
    }
}

impl CommandReader {
    /// Open a command file for streaming
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the transfer-command CSV file
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Io` if the file cannot be opened.
    pub fn new(path: &Path) -> Result<Self, LedgerError> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| LedgerError::Io {
                message: format!("Failed to open {}: {}", path.display(), e),
            })?;

        Ok(CommandReader {
            records: reader.into_deserialize(),
        })
    }
}

impl Iterator for CommandReader {
    type Item = Result<TransferCommand, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.records.next().map(|result| {
            result
                .map_err(LedgerError::from)
                .and_then(convert_command_row)
        })
    }
}
