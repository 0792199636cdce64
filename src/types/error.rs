//! Error types for the benefit ledger
//!
//! This module defines all error types that can occur while operating the
//! ledger. Errors carry enough context for a caller to branch on kind
//! rather than on message text.
//!
//! # Error Categories
//!
//! - **Validation Errors**: Same account, non-positive amount, insufficient
//!   funds. Caller input problems; no state change occurs.
//! - **Not-Found Errors**: A reference to a non-existent account.
//! - **Contention**: The lock pair for a transfer could not be acquired
//!   within the bounded wait. Transient; safe to retry from scratch.
//! - **Storage Faults**: The backing store is unusable (poisoned lock).
//!   Fatal to the individual operation, always surfaced.
//! - **File I/O / CSV Parsing Errors**: Ambient faults of the CSV pipeline.

use crate::types::AccountId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the benefit ledger
///
/// This enum represents all possible errors that can occur during ledger
/// operation. Each variant includes relevant context to help diagnose and
/// resolve the issue.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// The referenced account does not exist
    ///
    /// This is a recoverable error - the operation is rejected and no
    /// state change occurs.
    #[error("Account {id} not found")]
    AccountNotFound {
        /// The identifier that did not resolve
        id: AccountId,
    },

    /// Source and destination of a transfer are the same account
    ///
    /// Detected before any lock is taken. This is a recoverable error.
    #[error("Transfer source and destination are the same account ({id})")]
    SameAccount {
        /// The identifier used on both sides
        id: AccountId,
    },

    /// Transfer amount is zero or negative
    ///
    /// This is a recoverable error - the transfer is rejected and no
    /// state change occurs.
    #[error("Invalid transfer amount {amount}: must be positive")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// The transfer amount exceeds the source account's balance
    ///
    /// This is a recoverable error - the transfer is rejected and both
    /// balances remain unchanged.
    #[error("Insufficient funds in account {id}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Source account identifier
        id: AccountId,
        /// Current balance of the source account
        balance: Decimal,
        /// Requested transfer amount
        requested: Decimal,
    },

    /// The lock pair for a transfer could not be acquired in time
    ///
    /// Transient contention. No partial mutation has occurred, so the
    /// caller may safely retry the whole transfer.
    #[error("Transfer {from} -> {to} timed out waiting for account locks")]
    Busy {
        /// Source account identifier
        from: AccountId,
        /// Destination account identifier
        to: AccountId,
    },

    /// Arithmetic overflow would occur
    ///
    /// This is a recoverable error - the operation is rejected to keep the
    /// account balances intact.
    #[error("Arithmetic overflow in {operation} for account {id}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account identifier
        id: AccountId,
    },

    /// The backing store is unusable
    ///
    /// A fatal fault (poisoned lock). Never swallowed; the operation fails
    /// and the condition is surfaced to the caller.
    #[error("Storage fault: {message}")]
    Storage {
        /// Description of the storage fault
        message: String,
    },

    /// I/O error occurred while reading or writing files
    ///
    /// This is typically a fatal error (file permissions, disk full, etc.).
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// This is a recoverable error - the malformed record is skipped and
    /// processing continues with the next record.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Parse {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

// Conversion from io::Error to LedgerError
impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::Io {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to LedgerError
impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::Parse {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an AccountNotFound error
    pub fn account_not_found(id: AccountId) -> Self {
        LedgerError::AccountNotFound { id }
    }

    /// Create a SameAccount error
    pub fn same_account(id: AccountId) -> Self {
        LedgerError::SameAccount { id }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        LedgerError::InvalidAmount { amount }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(id: AccountId, balance: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            id,
            balance,
            requested,
        }
    }

    /// Create a Busy error
    pub fn busy(from: AccountId, to: AccountId) -> Self {
        LedgerError::Busy { from, to }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, id: AccountId) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            id,
        }
    }

    /// Create a Storage error
    pub fn storage(message: &str) -> Self {
        LedgerError::Storage {
            message: message.to_string(),
        }
    }

    /// Whether the caller can correct or retry the failed operation
    ///
    /// Validation failures, not-found references, contention, and overflow
    /// guards are recoverable: no state change occurred and the caller can
    /// fix the input or retry. Storage and I/O faults are fatal to the
    /// operation. Parse errors are recoverable at the pipeline level (the
    /// offending record is skipped).
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            LedgerError::Storage { .. } | LedgerError::Io { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    #[case::account_not_found(
        LedgerError::AccountNotFound { id: 42 },
        "Account 42 not found"
    )]
    #[case::same_account(
        LedgerError::SameAccount { id: 7 },
        "Transfer source and destination are the same account (7)"
    )]
    #[case::invalid_amount(
        LedgerError::InvalidAmount { amount: Decimal::new(-500, 2) },
        "Invalid transfer amount -5.00: must be positive"
    )]
    #[case::insufficient_funds(
        LedgerError::InsufficientFunds { id: 1, balance: Decimal::new(5000, 2), requested: Decimal::new(10000, 2) },
        "Insufficient funds in account 1: balance 50.00, requested 100.00"
    )]
    #[case::busy(
        LedgerError::Busy { from: 1, to: 2 },
        "Transfer 1 -> 2 timed out waiting for account locks"
    )]
    #[case::arithmetic_overflow(
        LedgerError::ArithmeticOverflow { operation: "credit".to_string(), id: 2 },
        "Arithmetic overflow in credit for account 2"
    )]
    #[case::storage(
        LedgerError::Storage { message: "poisoned lock".to_string() },
        "Storage fault: poisoned lock"
    )]
    #[case::io_error(
        LedgerError::Io { message: "Permission denied".to_string() },
        "I/O error: Permission denied"
    )]
    #[case::parse_error_with_line(
        LedgerError::Parse { line: Some(3), message: "Invalid field".to_string() },
        "CSV parse error at line 3: Invalid field"
    )]
    #[case::parse_error_without_line(
        LedgerError::Parse { line: None, message: "Invalid field".to_string() },
        "CSV parse error: Invalid field"
    )]
    fn test_error_display(#[case] error: LedgerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::account_not_found(LedgerError::account_not_found(1), true)]
    #[case::same_account(LedgerError::same_account(1), true)]
    #[case::invalid_amount(LedgerError::invalid_amount(Decimal::ZERO), true)]
    #[case::insufficient_funds(
        LedgerError::insufficient_funds(1, Decimal::ZERO, Decimal::ONE),
        true
    )]
    #[case::busy(LedgerError::busy(1, 2), true)]
    #[case::overflow(LedgerError::arithmetic_overflow("credit", 1), true)]
    #[case::parse(LedgerError::Parse { line: None, message: "bad".to_string() }, true)]
    #[case::storage(LedgerError::storage("poisoned lock"), false)]
    #[case::io(LedgerError::Io { message: "disk full".to_string() }, false)]
    fn test_is_recoverable(#[case] error: LedgerError, #[case] expected: bool) {
        assert_eq!(error.is_recoverable(), expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: LedgerError = io_error.into();
        assert!(matches!(error, LedgerError::Io { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }

    #[test]
    fn test_helper_functions_build_expected_variants() {
        assert_eq!(
            LedgerError::insufficient_funds(1, Decimal::new(5000, 2), Decimal::new(10000, 2)),
            LedgerError::InsufficientFunds {
                id: 1,
                balance: Decimal::new(5000, 2),
                requested: Decimal::new(10000, 2),
            }
        );
        assert_eq!(LedgerError::busy(3, 4), LedgerError::Busy { from: 3, to: 4 });
    }
}
