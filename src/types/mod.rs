//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account entity, identifier and credential checks
//! - `transaction`: Transaction records and kinds
//! - `error`: Error types for the ledger

pub mod account;
pub mod error;
pub mod transaction;

pub use account::{
    Account, AccountId, ACCOUNT_ID_WIDTH, AMOUNT_DECIMAL_PLACES, INITIAL_DEPOSIT_FIELD, PIN_LENGTH,
};
pub use error::BankError;
pub use transaction::{Transaction, TransactionKind};
