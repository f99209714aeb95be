//! Account store
//!
//! This module provides the `AccountStore` struct which owns every account of
//! a session and routes balance changes through the ledger operations.
//!
//! The AccountStore is responsible for:
//! - Opening accounts with unique generated identifiers
//! - Verifying credentials
//! - Resolving identifiers to the live account entity
//! - Keeping failed operations free of side effects

use crate::core::history::{self, History};
use crate::core::id_generator::IdGenerator;
use crate::core::ledger;
use crate::core::traits::{AccountSummary, Bank};
use crate::types::account::{validate_name, validate_opening_balance, validate_pin};
use crate::types::{Account, AccountId, BankError, Transaction};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Accounts pre-seeded when no seed file is supplied: id, pin, name, balance
pub const SAMPLE_ACCOUNTS: [(&str, &str, &str, i64); 2] = [
    ("123456", "1234", "John Doe", 5000),
    ("654321", "4321", "Jane Smith", 3000),
];

/// Single-threaded store of all accounts
///
/// Accounts live in a vector indexed by identifier so that a transfer can
/// borrow two distinct accounts mutably at once.
#[derive(Debug, Default)]
pub struct AccountStore {
    /// Account entities, in order of creation
    accounts: Vec<Account>,

    /// Map of identifiers to positions in `accounts`
    index: HashMap<AccountId, usize>,

    /// Source of fresh identifiers
    ids: IdGenerator,
}

impl AccountStore {
    /// Create an empty store with an entropy-seeded identifier generator
    pub fn new() -> Self {
        Self::with_generator(IdGenerator::new())
    }

    /// Create an empty store using the given identifier generator
    pub fn with_generator(ids: IdGenerator) -> Self {
        AccountStore {
            accounts: Vec::new(),
            index: HashMap::new(),
            ids,
        }
    }

    /// Add the built-in sample accounts
    pub fn seed_samples(&mut self) -> Result<(), BankError> {
        for (id, pin, name, balance) in SAMPLE_ACCOUNTS {
            self.insert_seeded(AccountId::parse(id)?, pin, name, Decimal::from(balance))?;
        }
        Ok(())
    }

    /// Insert a pre-existing account
    ///
    /// Seeded accounts are validated like registrations but start with an
    /// empty transaction log.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for malformed input and `DuplicateAccount` if the
    /// identifier is already present.
    pub fn insert_seeded(
        &mut self,
        id: AccountId,
        pin: &str,
        name: &str,
        balance: Decimal,
    ) -> Result<&Account, BankError> {
        validate_pin(pin)?;
        let name = validate_name(name)?;
        validate_opening_balance(balance)?;

        if self.index.contains_key(&id) {
            return Err(BankError::duplicate_account(id.as_str()));
        }

        Ok(self.insert(Account::new(id, pin, name, balance)))
    }

    /// Register a new account
    ///
    /// Validates the inputs, generates a fresh identifier and records the
    /// opening balance as a deposit when it is positive.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the PIN is not four digits, the name is blank,
    /// or the initial deposit is negative.
    pub fn register(
        &mut self,
        pin: &str,
        name: &str,
        initial_deposit: Decimal,
    ) -> Result<&Account, BankError> {
        validate_pin(pin)?;
        let name = validate_name(name)?;
        validate_opening_balance(initial_deposit)?;

        let index = &self.index;
        let id = self.ids.generate(|candidate| index.contains_key(candidate))?;

        let mut account = Account::new(id, pin, name, initial_deposit);
        ledger::record_opening_balance(&mut account);

        tracing::info!(account = %account.id, "account registered");
        Ok(self.insert(account))
    }

    /// Verify credentials and return the live account
    ///
    /// # Errors
    ///
    /// Returns `Authentication` if the identifier is unknown or the PIN does
    /// not match.
    pub fn authenticate(&self, id: &AccountId, pin: &str) -> Result<&Account, BankError> {
        match self.lookup(id) {
            Some(account) if account.pin_matches(pin) => Ok(account),
            _ => {
                tracing::warn!(account = %id, "failed sign-in");
                Err(BankError::Authentication)
            }
        }
    }

    /// Resolve an identifier to its account
    pub fn lookup(&self, id: &AccountId) -> Option<&Account> {
        self.index.get(id).map(|&position| &self.accounts[position])
    }

    /// Resolve an identifier to its account for mutation through the ledger
    pub fn lookup_mut(&mut self, id: &AccountId) -> Option<&mut Account> {
        let position = *self.index.get(id)?;
        Some(&mut self.accounts[position])
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Deposit into the identified account
    pub fn deposit(&mut self, id: &AccountId, amount: Decimal) -> Result<Decimal, BankError> {
        let account = self
            .lookup_mut(id)
            .ok_or_else(|| BankError::account_not_found(id.as_str()))?;
        let result = ledger::deposit(account, amount);
        log_outcome("deposit", id, amount, &result);
        result
    }

    /// Withdraw from the identified account
    pub fn withdraw(&mut self, id: &AccountId, amount: Decimal) -> Result<Decimal, BankError> {
        let account = self
            .lookup_mut(id)
            .ok_or_else(|| BankError::account_not_found(id.as_str()))?;
        let result = ledger::withdraw(account, amount);
        log_outcome("withdraw", id, amount, &result);
        result
    }

    /// Transfer between two identified accounts
    ///
    /// Checks run in this order: amount, self transfer, source exists,
    /// recipient exists, funds.
    pub fn transfer(
        &mut self,
        source: &AccountId,
        destination: &AccountId,
        amount: Decimal,
    ) -> Result<Decimal, BankError> {
        let result = self.transfer_inner(source, destination, amount);
        log_outcome("transfer", source, amount, &result);
        result
    }

    fn transfer_inner(
        &mut self,
        source: &AccountId,
        destination: &AccountId,
        amount: Decimal,
    ) -> Result<Decimal, BankError> {
        ledger::validate_amount(amount)?;
        if source == destination {
            return Err(BankError::self_transfer(source.as_str()));
        }

        let from = *self
            .index
            .get(source)
            .ok_or_else(|| BankError::account_not_found(source.as_str()))?;
        let to = *self
            .index
            .get(destination)
            .ok_or_else(|| BankError::recipient_not_found(destination.as_str()))?;

        let (source_account, destination_account) = pair_mut(&mut self.accounts, from, to);
        ledger::transfer(source_account, destination_account, amount)
    }

    /// Newest-first view of the identified account's transactions
    pub fn history(&self, id: &AccountId) -> Option<History<'_>> {
        self.lookup(id).map(history::history)
    }

    fn insert(&mut self, account: Account) -> &Account {
        let position = self.accounts.len();
        self.index.insert(account.id.clone(), position);
        self.accounts.push(account);
        &self.accounts[position]
    }
}

/// Borrow two distinct elements of a slice mutably
fn pair_mut<T>(items: &mut [T], first: usize, second: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(first, second);
    if first < second {
        let (head, tail) = items.split_at_mut(second);
        (&mut head[first], &mut tail[0])
    } else {
        let (head, tail) = items.split_at_mut(first);
        (&mut tail[0], &mut head[second])
    }
}

pub(crate) fn log_outcome(
    operation: &str,
    account: &AccountId,
    amount: Decimal,
    result: &Result<Decimal, BankError>,
) {
    match result {
        Ok(balance) => {
            tracing::info!(operation, account = %account, %amount, %balance, "ledger operation applied")
        }
        Err(error) => {
            tracing::warn!(operation, account = %account, %amount, %error, "ledger operation rejected")
        }
    }
}

pub(crate) fn summarize(account: &Account) -> AccountSummary {
    AccountSummary {
        id: account.id.clone(),
        name: account.name.clone(),
        balance: account.balance(),
    }
}

impl Bank for AccountStore {
    fn open_account(
        &mut self,
        pin: &str,
        name: &str,
        initial_deposit: Decimal,
    ) -> Result<AccountSummary, BankError> {
        self.register(pin, name, initial_deposit).map(summarize)
    }

    fn sign_in(&self, id: &AccountId, pin: &str) -> Result<AccountSummary, BankError> {
        self.authenticate(id, pin).map(summarize)
    }

    fn summary(&self, id: &AccountId) -> Option<AccountSummary> {
        self.lookup(id).map(summarize)
    }

    fn deposit_to(&mut self, id: &AccountId, amount: Decimal) -> Result<Decimal, BankError> {
        self.deposit(id, amount)
    }

    fn withdraw_from(&mut self, id: &AccountId, amount: Decimal) -> Result<Decimal, BankError> {
        self.withdraw(id, amount)
    }

    fn transfer_between(
        &mut self,
        source: &AccountId,
        destination: &AccountId,
        amount: Decimal,
    ) -> Result<Decimal, BankError> {
        self.transfer(source, destination, amount)
    }

    fn statement(&self, id: &AccountId) -> Result<Vec<Transaction>, BankError> {
        self.history(id)
            .map(|view| view.to_vec())
            .ok_or_else(|| BankError::account_not_found(id.as_str()))
    }
}
