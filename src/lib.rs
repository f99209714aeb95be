//! ATM Ledger Library
//! # Overview
//!
//! This library provides an in-memory banking simulator: an account store,
//! validated ledger operations and a newest-first history view, driven by an
//! interactive text session.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Transaction, BankError)
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Deposit, withdrawal and transfer over resolved accounts
//!   - [`core::history`] - Read-only newest-first view of an account's log
//!   - [`core::account_store`] - Single-threaded account store
//!   - [`core::concurrent`] - Thread-safe account store with per-account locks
//! - [`io`] - Seed file loading, CSV statement export and display formatting
//! - [`cli`] - CLI arguments and the interactive session
//! - [`telemetry`] - Logging setup
//!
//! # Transaction Kinds
//!
//! - **DEPOSIT**: Credit funds to an account, including the opening balance
//! - **WITHDRAW**: Debit funds from an account (requires sufficient balance)
//! - **TRANSFER_OUT** / **TRANSFER_IN**: The two sides of a transfer, each
//!   naming the other account
//!
//! # Invariants
//!
//! - A balance is never negative
//! - A failed operation leaves every account exactly as it was
//! - A transfer debits, credits and records both sides as one step

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod telemetry;
pub mod types;

pub use core::{AccountStore, Bank, ConcurrentAccountStore, History};
pub use types::{Account, AccountId, BankError, Transaction, TransactionKind};
