//! History view
//!
//! Read-only, newest-first projection of an account's transaction log. The
//! log is stored oldest-first, so the view simply walks it backwards. A
//! `History` holds no cursor and can be iterated any number of times.

use crate::types::{Account, Transaction};
use std::iter::Rev;
use std::slice;

/// Newest-first view over an account's transactions
#[derive(Debug, Clone, Copy)]
pub struct History<'a> {
    log: &'a [Transaction],
}

/// View an account's transactions, most recent first
pub fn history(account: &Account) -> History<'_> {
    History { log: &account.log }
}

impl<'a> History<'a> {
    pub fn iter(&self) -> Rev<slice::Iter<'a, Transaction>> {
        self.log.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// The most recent transaction, if any
    pub fn latest(&self) -> Option<&'a Transaction> {
        self.log.last()
    }

    /// Owned copy of the view, newest first
    pub fn to_vec(&self) -> Vec<Transaction> {
        self.iter().cloned().collect()
    }
}

impl<'a> IntoIterator for History<'a> {
    type Item = &'a Transaction;
    type IntoIter = Rev<slice::Iter<'a, Transaction>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &History<'a> {
    type Item = &'a Transaction;
    type IntoIter = Rev<slice::Iter<'a, Transaction>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ledger;
    use crate::types::{AccountId, TransactionKind};
    use rust_decimal::Decimal;

    fn account() -> Account {
        Account::new(
            AccountId::from_number(7, 6),
            "1234",
            "Holder",
            Decimal::new(100, 0),
        )
    }

    #[test]
    fn test_empty_history() {
        let account = account();
        let view = history(&account);
        assert!(view.is_empty());
        assert_eq!(view.iter().count(), 0);
        assert!(view.latest().is_none());
    }

    #[test]
    fn test_history_is_newest_first() {
        let mut account = account();
        ledger::deposit(&mut account, Decimal::new(10, 0)).unwrap();
        ledger::withdraw(&mut account, Decimal::new(5, 0)).unwrap();
        ledger::deposit(&mut account, Decimal::new(1, 0)).unwrap();

        let kinds: Vec<_> = history(&account).iter().map(|t| t.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                TransactionKind::Deposit,
                TransactionKind::Withdraw,
                TransactionKind::Deposit
            ]
        );

        let balances: Vec<_> = history(&account)
            .iter()
            .map(|t| t.balance_after())
            .collect();
        assert_eq!(
            balances,
            vec![Decimal::new(106, 0), Decimal::new(105, 0), Decimal::new(110, 0)]
        );

        let view = history(&account);
        assert!(view
            .to_vec()
            .windows(2)
            .all(|pair| pair[0].timestamp() >= pair[1].timestamp()));
        assert_eq!(view.latest().map(|t| t.amount()), Some(Decimal::new(1, 0)));
    }

    #[test]
    fn test_history_is_restartable() {
        let mut account = account();
        ledger::deposit(&mut account, Decimal::new(10, 0)).unwrap();
        ledger::deposit(&mut account, Decimal::new(20, 0)).unwrap();

        let view = history(&account);
        let first: Vec<_> = view.iter().collect();
        let second: Vec<_> = (&view).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(view.len(), 2);
    }
}
