//! Core trait for the account backends
//!
//! This module defines the trait abstraction that allows both the
//! single-threaded and the concurrent account store to be driven by the same
//! session code. Accounts are addressed by identifier; the store keeps the
//! only copy of each account and callers hold the identifier as their handle.

use crate::types::{AccountId, BankError, Transaction};
use rust_decimal::Decimal;

/// Read-only snapshot of an account for presentation
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSummary {
    pub id: AccountId,
    pub name: String,
    pub balance: Decimal,
}

/// Operations offered by an account store
///
/// Every failing call leaves the store exactly as it was before the call.
pub trait Bank {
    /// Open a new account and return its summary
    fn open_account(
        &mut self,
        pin: &str,
        name: &str,
        initial_deposit: Decimal,
    ) -> Result<AccountSummary, BankError>;

    /// Verify credentials and return the account's summary
    fn sign_in(&self, id: &AccountId, pin: &str) -> Result<AccountSummary, BankError>;

    /// Current summary of an account, if it exists
    fn summary(&self, id: &AccountId) -> Option<AccountSummary>;

    /// Deposit into an account, returning the new balance
    fn deposit_to(&mut self, id: &AccountId, amount: Decimal) -> Result<Decimal, BankError>;

    /// Withdraw from an account, returning the new balance
    fn withdraw_from(&mut self, id: &AccountId, amount: Decimal) -> Result<Decimal, BankError>;

    /// Transfer between accounts, returning the source's new balance
    fn transfer_between(
        &mut self,
        source: &AccountId,
        destination: &AccountId,
        amount: Decimal,
    ) -> Result<Decimal, BankError>;

    /// Transactions of an account, newest first
    fn statement(&self, id: &AccountId) -> Result<Vec<Transaction>, BankError>;
}
