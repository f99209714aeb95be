//! Thread-safe account store
//!
//! This module provides the `ConcurrentAccountStore` struct, which manages
//! accounts using concurrent data structures so that many sessions can
//! operate on the same store at once.
//!
//! # Design
//!
//! The identifier map is a `DashMap`, and every account sits behind its own
//! `Mutex`. Map guards are never held while an account is locked: handles are
//! cloned out of the map first. A transfer locks its two accounts in
//! ascending identifier order, so two opposite transfers between the same
//! pair of accounts cannot deadlock.

use crate::core::account_store::{log_outcome, summarize, SAMPLE_ACCOUNTS};
use crate::core::history;
use crate::core::id_generator::IdGenerator;
use crate::core::ledger;
use crate::core::traits::{AccountSummary, Bank};
use crate::types::account::{validate_name, validate_opening_balance, validate_pin};
use crate::types::{Account, AccountId, BankError, Transaction};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Shared handle to a live account
pub type AccountHandle = Arc<Mutex<Account>>;

/// Thread-safe account store
///
/// All methods take `&self` and are safe to call from multiple threads.
#[derive(Debug, Default)]
pub struct ConcurrentAccountStore {
    /// Concurrent map of identifiers to account handles
    accounts: DashMap<AccountId, AccountHandle>,

    /// Identifier source, shared by concurrent registrations
    ids: Mutex<IdGenerator>,
}

impl ConcurrentAccountStore {
    /// Create an empty store with an entropy-seeded identifier generator
    pub fn new() -> Self {
        Self::with_generator(IdGenerator::new())
    }

    /// Create an empty store using the given identifier generator
    pub fn with_generator(ids: IdGenerator) -> Self {
        ConcurrentAccountStore {
            accounts: DashMap::new(),
            ids: Mutex::new(ids),
        }
    }

    /// Add the built-in sample accounts
    pub fn seed_samples(&self) -> Result<(), BankError> {
        for (id, pin, name, balance) in SAMPLE_ACCOUNTS {
            self.insert_seeded(AccountId::parse(id)?, pin, name, Decimal::from(balance))?;
        }
        Ok(())
    }

    /// Insert a pre-existing account with an empty transaction log
    ///
    /// # Errors
    ///
    /// Returns `Validation` for malformed input and `DuplicateAccount` if the
    /// identifier is already present.
    pub fn insert_seeded(
        &self,
        id: AccountId,
        pin: &str,
        name: &str,
        balance: Decimal,
    ) -> Result<AccountHandle, BankError> {
        validate_pin(pin)?;
        let name = validate_name(name)?;
        validate_opening_balance(balance)?;

        match self.accounts.entry(id.clone()) {
            Entry::Occupied(_) => Err(BankError::duplicate_account(id.as_str())),
            Entry::Vacant(slot) => {
                let handle = Arc::new(Mutex::new(Account::new(id, pin, name, balance)));
                slot.insert(Arc::clone(&handle));
                Ok(handle)
            }
        }
    }

    /// Register a new account
    ///
    /// The identifier is claimed through the map's entry API, so a
    /// concurrent registration that drew the same candidate retries instead
    /// of overwriting.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the PIN is not four digits, the name is blank,
    /// or the initial deposit is negative.
    pub fn register(
        &self,
        pin: &str,
        name: &str,
        initial_deposit: Decimal,
    ) -> Result<AccountHandle, BankError> {
        validate_pin(pin)?;
        let name = validate_name(name)?;
        validate_opening_balance(initial_deposit)?;

        loop {
            let id = self
                .ids
                .lock()
                .generate(|candidate| self.accounts.contains_key(candidate))?;

            if let Entry::Vacant(slot) = self.accounts.entry(id.clone()) {
                let mut account = Account::new(id, pin, name, initial_deposit);
                ledger::record_opening_balance(&mut account);
                tracing::info!(account = %account.id, "account registered");

                let handle = Arc::new(Mutex::new(account));
                slot.insert(Arc::clone(&handle));
                return Ok(handle);
            }
            tracing::debug!(account = %id, "identifier claimed concurrently, retrying");
        }
    }

    /// Verify credentials and return a handle to the live account
    ///
    /// # Errors
    ///
    /// Returns `Authentication` if the identifier is unknown or the PIN does
    /// not match.
    pub fn authenticate(&self, id: &AccountId, pin: &str) -> Result<AccountHandle, BankError> {
        match self.lookup(id) {
            Some(handle) if handle.lock().pin_matches(pin) => Ok(handle),
            _ => {
                tracing::warn!(account = %id, "failed sign-in");
                Err(BankError::Authentication)
            }
        }
    }

    /// Resolve an identifier to a handle on its account
    pub fn lookup(&self, id: &AccountId) -> Option<AccountHandle> {
        self.accounts.get(id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Deposit into the identified account
    pub fn deposit(&self, id: &AccountId, amount: Decimal) -> Result<Decimal, BankError> {
        let handle = self
            .lookup(id)
            .ok_or_else(|| BankError::account_not_found(id.as_str()))?;
        let result = ledger::deposit(&mut handle.lock(), amount);
        log_outcome("deposit", id, amount, &result);
        result
    }

    /// Withdraw from the identified account
    pub fn withdraw(&self, id: &AccountId, amount: Decimal) -> Result<Decimal, BankError> {
        let handle = self
            .lookup(id)
            .ok_or_else(|| BankError::account_not_found(id.as_str()))?;
        let result = ledger::withdraw(&mut handle.lock(), amount);
        log_outcome("withdraw", id, amount, &result);
        result
    }

    /// Transfer between two identified accounts
    ///
    /// Checks run in this order: amount, self transfer, source exists,
    /// recipient exists, funds. Both accounts stay locked for the whole
    /// check-and-apply step.
    pub fn transfer(
        &self,
        source: &AccountId,
        destination: &AccountId,
        amount: Decimal,
    ) -> Result<Decimal, BankError> {
        let result = self.transfer_inner(source, destination, amount);
        log_outcome("transfer", source, amount, &result);
        result
    }

    fn transfer_inner(
        &self,
        source: &AccountId,
        destination: &AccountId,
        amount: Decimal,
    ) -> Result<Decimal, BankError> {
        ledger::validate_amount(amount)?;
        if source == destination {
            return Err(BankError::self_transfer(source.as_str()));
        }

        let from = self
            .lookup(source)
            .ok_or_else(|| BankError::account_not_found(source.as_str()))?;
        let to = self
            .lookup(destination)
            .ok_or_else(|| BankError::recipient_not_found(destination.as_str()))?;

        if source < destination {
            let mut source_account = from.lock();
            let mut destination_account = to.lock();
            ledger::transfer(&mut source_account, &mut destination_account, amount)
        } else {
            let mut destination_account = to.lock();
            let mut source_account = from.lock();
            ledger::transfer(&mut source_account, &mut destination_account, amount)
        }
    }

    /// Snapshot of the identified account's transactions, newest first
    pub fn history(&self, id: &AccountId) -> Option<Vec<Transaction>> {
        self.lookup(id)
            .map(|handle| history::history(&handle.lock()).to_vec())
    }
}

impl Bank for ConcurrentAccountStore {
    fn open_account(
        &mut self,
        pin: &str,
        name: &str,
        initial_deposit: Decimal,
    ) -> Result<AccountSummary, BankError> {
        self.register(pin, name, initial_deposit)
            .map(|handle| summarize(&handle.lock()))
    }

    fn sign_in(&self, id: &AccountId, pin: &str) -> Result<AccountSummary, BankError> {
        self.authenticate(id, pin)
            .map(|handle| summarize(&handle.lock()))
    }

    fn summary(&self, id: &AccountId) -> Option<AccountSummary> {
        self.lookup(id).map(|handle| summarize(&handle.lock()))
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
            .ok_or_else(|| BankError::account_not_found(id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionKind;
    use rstest::{fixture, rstest};
    use std::thread;

    fn id(raw: &str) -> AccountId {
        AccountId::parse(raw).unwrap()
    }

    #[fixture]
    fn store() -> ConcurrentAccountStore {
        let store = ConcurrentAccountStore::with_generator(IdGenerator::seeded(3));
        store.seed_samples().unwrap();
        store
    }

    #[rstest]
    fn test_seed_samples(store: ConcurrentAccountStore) {
        assert_eq!(store.len(), 2);
        assert!(!store.is_empty());
        let jane = store.lookup(&id("654321")).unwrap();
        assert_eq!(jane.lock().balance(), Decimal::new(3000, 0));
    }

    #[rstest]
    fn test_authenticate_returns_live_handle(store: ConcurrentAccountStore) {
        let handle = store.authenticate(&id("123456"), "1234").unwrap();
        store.deposit(&id("123456"), Decimal::new(1, 0)).unwrap();
        assert_eq!(handle.lock().balance(), Decimal::new(5001, 0));
    }

    #[rstest]
    #[case::wrong_pin("123456", "9999")]
    #[case::unknown_id("999999", "1234")]
    fn test_authenticate_failures(
        store: ConcurrentAccountStore,
        #[case] raw: &str,
        #[case] pin: &str,
    ) {
        assert!(matches!(
            store.authenticate(&id(raw), pin),
            Err(BankError::Authentication)
        ));
    }

    #[rstest]
    fn test_register_records_opening_deposit(store: ConcurrentAccountStore) {
        let handle = store.register("1357", "Alan", Decimal::new(10, 0)).unwrap();
        let account_id = handle.lock().id.clone();

        let history = store.history(&account_id).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].kind(), TransactionKind::Deposit);
        assert_eq!(store.len(), 3);
    }

    #[rstest]
    fn test_register_rejects_blank_name(store: ConcurrentAccountStore) {
        assert!(matches!(
            store.register("1234", "   ", Decimal::ZERO),
            Err(BankError::Validation { .. })
        ));
        assert_eq!(store.len(), 2);
    }

    #[rstest]
    fn test_insert_seeded_rejects_duplicate(store: ConcurrentAccountStore) {
        assert!(matches!(
            store.insert_seeded(id("123456"), "1234", "Dup", Decimal::ZERO),
            Err(BankError::DuplicateAccount { .. })
        ));
    }

    #[rstest]
    #[case::self_transfer("123456", "123456", Decimal::new(10, 0), BankError::self_transfer("123456"))]
    #[case::recipient_not_found("123456", "000000", Decimal::new(10, 0), BankError::recipient_not_found("000000"))]
    #[case::negative_amount("123456", "654321", Decimal::new(-10, 0), BankError::InvalidAmount { amount: Decimal::new(-10, 0) })]
    fn test_transfer_failures(
        store: ConcurrentAccountStore,
        #[case] source: &str,
        #[case] destination: &str,
        #[case] amount: Decimal,
        #[case] expected: BankError,
    ) {
        assert_eq!(store.transfer(&id(source), &id(destination), amount), Err(expected));
        assert_eq!(store.history(&id("123456")).unwrap().len(), 0);
        assert_eq!(store.history(&id("654321")).unwrap().len(), 0);
    }

    #[rstest]
    fn test_opposite_transfers_do_not_deadlock(store: ConcurrentAccountStore) {
        let (john, jane) = (id("123456"), id("654321"));
        let rounds = 1_000;

        thread::scope(|scope| {
            scope.spawn(|| {
                for _ in 0..rounds {
                    store.transfer(&john, &jane, Decimal::ONE).unwrap();
                }
            });
            scope.spawn(|| {
                for _ in 0..rounds {
                    store.transfer(&jane, &john, Decimal::ONE).unwrap();
                }
            });
        });

        let john_account = store.lookup(&john).unwrap();
        let jane_account = store.lookup(&jane).unwrap();
        assert_eq!(john_account.lock().balance(), Decimal::new(5000, 0));
        assert_eq!(jane_account.lock().balance(), Decimal::new(3000, 0));
        assert_eq!(john_account.lock().transaction_count(), 2 * rounds);
        assert_eq!(jane_account.lock().transaction_count(), 2 * rounds);
    }

    #[rstest]
    fn test_concurrent_withdrawals_never_overdraw(store: ConcurrentAccountStore) {
        let jane = id("654321");

        // 8 threads each try 100 withdrawals of 5 against a balance of 3000
        let succeeded: usize = thread::scope(|scope| {
            let workers: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        (0..100)
                            .filter(|_| store.withdraw(&jane, Decimal::new(5, 0)).is_ok())
                            .count()
                    })
                })
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).sum()
        });

        assert_eq!(succeeded, 600);
        let balance = store.lookup(&jane).unwrap().lock().balance();
        assert_eq!(balance, Decimal::ZERO);
    }

    #[test]
    fn test_concurrent_registrations_get_distinct_identifiers() {
        let store = ConcurrentAccountStore::with_generator(IdGenerator::seeded(11));

        thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..250 {
                        store.register("1234", "Bulk", Decimal::ZERO).unwrap();
                    }
                });
            }
        });

        assert_eq!(store.len(), 1_000);
    }
}
