//! Transaction-related types for the ATM ledger
//!
//! This module defines the kinds of balance-affecting events and the
//! immutable record stored in each account's log.

use super::account::AccountId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Kinds of balance-affecting events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Funds credited to the account, including the opening balance
    Deposit,

    /// Funds debited from the account
    Withdraw,

    /// Funds sent to another account
    ///
    /// The counterparty is the destination account.
    TransferOut,

    /// Funds received from another account
    ///
    /// The counterparty is the source account.
    TransferIn,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "DEPOSIT",
            TransactionKind::Withdraw => "WITHDRAW",
            TransactionKind::TransferOut => "TRANSFER_OUT",
            TransactionKind::TransferIn => "TRANSFER_IN",
        }
    }

    /// Whether records of this kind carry a counterparty
    pub fn has_counterparty(&self) -> bool {
        matches!(self, TransactionKind::TransferOut | TransactionKind::TransferIn)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable record of one balance-affecting event
///
/// Fields are private so a record cannot be altered once it has been
/// appended to a log. Records are created by the ledger operations only.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    timestamp: DateTime<Utc>,
    kind: TransactionKind,
    amount: Decimal,
    counterparty: Option<AccountId>,
    balance_after: Decimal,
}

impl Transaction {
    pub(crate) fn new(
        timestamp: DateTime<Utc>,
        kind: TransactionKind,
        amount: Decimal,
        counterparty: Option<AccountId>,
        balance_after: Decimal,
    ) -> Self {
        debug_assert_eq!(kind.has_counterparty(), counterparty.is_some());
        Transaction {
            timestamp,
            kind,
            amount,
            counterparty,
            balance_after,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// The other account of a transfer, `None` for deposits and withdrawals
    pub fn counterparty(&self) -> Option<&AccountId> {
        self.counterparty.as_ref()
    }

    /// Balance of the owning account immediately after this event
    pub fn balance_after(&self) -> Decimal {
        self.balance_after
    }
}
