//! Error types for the ATM ledger
//!
//! This module defines all error types that can occur while operating on
//! accounts. Errors are descriptive enough to be shown to the user as-is.
//!
//! # Error Categories
//!
//! - **Registration Errors**: malformed PIN, blank name, negative opening balance
//! - **Authentication Errors**: unknown identifier or wrong PIN
//! - **Ledger Errors**: non-positive or sub-cent amounts, insufficient funds, self transfers,
//!   unknown recipients, arithmetic overflow
//! - **Seed File Errors**: file not found, malformed CSV, duplicate identifiers
//!
//! Every ledger error is returned before any account is mutated, so callers
//! can report it and carry on.

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the ATM ledger
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    /// Registration or seed input failed validation
    #[error("Invalid {field}: {reason}")]
    Validation {
        /// The offending input field
        field: String,
        /// What is wrong with it
        reason: String,
    },

    /// Unknown identifier or PIN mismatch
    ///
    /// Deliberately does not say which of the two was wrong.
    #[error("Invalid User ID or PIN")]
    Authentication,

    /// Amount was zero or negative
    #[error("Amount must be positive, got {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Amount has more decimal places than a balance may hold
    #[error("Amount {amount} has more than {places} decimal places")]
    ExcessPrecision {
        /// The rejected amount
        amount: Decimal,
        /// Allowed decimal places
        places: u32,
    },

    /// Amount exceeds the account balance
    #[error("Insufficient funds in account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Account identifier
        account: String,
        /// Balance at the time of the request
        balance: Decimal,
        /// Requested amount
        requested: Decimal,
    },

    /// Source and destination of a transfer are the same account
    #[error("Cannot transfer from account {account} to itself")]
    SelfTransfer {
        /// Account identifier
        account: String,
    },

    /// Destination of a transfer does not exist
    #[error("Recipient {account} not found")]
    RecipientNotFound {
        /// The unresolved destination identifier
        account: String,
    },

    /// An operation referenced an account that does not exist
    #[error("Account {account} not found")]
    AccountNotFound {
        /// The unresolved identifier
        account: String,
    },

    /// Balance arithmetic would overflow the decimal range
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account identifier
        account: String,
    },

    /// No free identifier could be found up to the widest allowed width
    #[error("No free account identifier available (tried up to {width} digits)")]
    IdentifierSpaceExhausted {
        /// Widest identifier width attempted
        width: usize,
    },

    /// An account with this identifier already exists
    #[error("Account {account} already exists")]
    DuplicateAccount {
        /// The duplicated identifier
        account: String,
    },

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

impl From<std::io::Error> for BankError {
    fn from(error: std::io::Error) -> Self {
        BankError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for BankError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        BankError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl BankError {
    /// Create a Validation error
    pub fn validation(field: &str, reason: &str) -> Self {
        BankError::Validation {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        BankError::InvalidAmount { amount }
    }

    /// Create an ExcessPrecision error
    pub fn excess_precision(amount: Decimal, places: u32) -> Self {
        BankError::ExcessPrecision { amount, places }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: &str, balance: Decimal, requested: Decimal) -> Self {
        BankError::InsufficientFunds {
            account: account.to_string(),
            balance,
            requested,
        }
    }

    /// Create a SelfTransfer error
    pub fn self_transfer(account: &str) -> Self {
        BankError::SelfTransfer {
            account: account.to_string(),
        }
    }

    /// Create a RecipientNotFound error
    pub fn recipient_not_found(account: &str) -> Self {
        BankError::RecipientNotFound {
            account: account.to_string(),
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account: &str) -> Self {
        BankError::AccountNotFound {
            account: account.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: &str) -> Self {
        BankError::ArithmeticOverflow {
            operation: operation.to_string(),
            account: account.to_string(),
        }
    }

    /// Create a DuplicateAccount error
    pub fn duplicate_account(account: &str) -> Self {
        BankError::DuplicateAccount {
            account: account.to_string(),
        }
    }
}
