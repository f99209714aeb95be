//! Human-readable formatting for the interactive session
//!
//! Pure functions that turn amounts and transaction histories into text.

use crate::types::{BankError, Transaction, AMOUNT_DECIMAL_PLACES};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Write as _;
use std::str::FromStr;

/// Timestamp layout used in the history table
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Format an amount with exactly two decimal places, rounding half away from zero
pub fn format_amount(amount: Decimal) -> String {
    let rounded =
        amount.round_dp_with_strategy(AMOUNT_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Format an amount as currency with two decimal places
pub fn money(amount: Decimal) -> String {
    format!("${}", format_amount(amount))
}

/// Parse a user-entered amount
///
/// Accepts plain decimal numbers with an optional leading `$`. Sign and
/// magnitude are left for the ledger to judge.
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);
    Decimal::from_str(trimmed).ok()
}

/// Short message shown to the user for a rejected operation
pub fn user_message(error: &BankError) -> String {
    match error {
        BankError::InvalidAmount { .. } => "Amount must be positive.".to_string(),
        BankError::ExcessPrecision { places, .. } => {
            format!("Amount cannot have more than {} decimal places.", places)
        }
        BankError::InsufficientFunds { .. } => "Insufficient funds.".to_string(),
        BankError::SelfTransfer { .. } => "Cannot transfer to yourself.".to_string(),
        BankError::RecipientNotFound { .. } => "Recipient not found.".to_string(),
        BankError::Authentication => "Invalid User ID or PIN. Please try again.".to_string(),
        other => other.to_string(),
    }
}

/// Render a newest-first history as a fixed-width table
pub fn history_table<'a, I>(transactions: I) -> String
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut rows = transactions.into_iter().peekable();
    if rows.peek().is_none() {
        return "No transactions found.\n".to_string();
    }

    let mut table = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(
        table,
        "{:<20} {:<12} {:<10} {:<10} {:<15}",
        "Date/Time", "Type", "Amount", "To/From", "Balance"
    );
    table.push_str(&"-".repeat(60));
    table.push('\n');

    for transaction in rows {
        let counterparty = transaction
            .counterparty()
            .map(|id| id.as_str())
            .unwrap_or("N/A");
        let _ = writeln!(
            table,
            "{:<20} {:<12} {:<10} {:<10} {:<15}",
            transaction.timestamp().format(TIMESTAMP_FORMAT).to_string(),
            transaction.kind().as_str(),
            format_amount(transaction.amount()),
            counterparty,
            format_amount(transaction.balance_after()),
        );
    }
    table
}
