//! CSV export of account history
//!
//! Writes a statement with the columns
//! `timestamp,kind,amount,counterparty,balance_after`, newest first.
//! Timestamps are RFC 3339 in UTC; amounts are rounded to two decimal places.

use crate::io::display::format_amount;
use crate::types::{BankError, Transaction, TransactionKind};
use serde::Serialize;
use std::io::Write;

/// One statement row as written to CSV
#[derive(Debug, Serialize, PartialEq)]
pub struct StatementRow {
    pub timestamp: String,
    pub kind: TransactionKind,
    pub amount: String,
    pub counterparty: String,
    pub balance_after: String,
}

impl From<&Transaction> for StatementRow {
    fn from(transaction: &Transaction) -> Self {
        StatementRow {
            timestamp: transaction.timestamp().to_rfc3339(),
            kind: transaction.kind(),
            amount: format_amount(transaction.amount()),
            counterparty: transaction
                .counterparty()
                .map(ToString::to_string)
                .unwrap_or_default(),
            balance_after: format_amount(transaction.balance_after()),
        }
    }
}

/// Write a newest-first statement as CSV
///
/// The header is written even when there are no transactions.
pub fn write_statement_csv<'a, I>(transactions: I, output: &mut dyn Write) -> Result<(), BankError>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);

    writer.write_record(["timestamp", "kind", "amount", "counterparty", "balance_after"])?;
    for transaction in transactions {
        writer.serialize(StatementRow::from(transaction))?;
    }
    writer.flush()?;

    Ok(())
}
