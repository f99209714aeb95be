//! Ledger operations
//!
//! Validated balance mutations over already-resolved accounts. Every function
//! performs all of its checks, including overflow checks, before touching an
//! account, so a returned error always leaves the accounts exactly as they
//! were. On success the new balance is written first and the matching record
//! is appended to the log.

use crate::types::account::{exceeds_precision, AMOUNT_DECIMAL_PLACES};
use crate::types::{Account, BankError, Transaction, TransactionKind};
use chrono::Utc;
use rust_decimal::Decimal;

/// Reject zero, negative and sub-cent amounts
pub fn validate_amount(amount: Decimal) -> Result<(), BankError> {
    if amount <= Decimal::ZERO {
        return Err(BankError::invalid_amount(amount));
    }
    if exceeds_precision(amount) {
        return Err(BankError::excess_precision(amount, AMOUNT_DECIMAL_PLACES));
    }
    Ok(())
}

/// Keep a result only if no decimal places were rounded away
///
/// `Decimal` arithmetic drops scale instead of failing once the result needs
/// more than 28 significant digits.
fn exact(result: Option<Decimal>, lhs: Decimal, rhs: Decimal) -> Option<Decimal> {
    result.filter(|value| value.scale() >= lhs.scale().max(rhs.scale()))
}

/// Credit funds to an account
///
/// # Returns
///
/// * `Ok(Decimal)` - The new balance
/// * `Err(BankError)` - If the amount is not positive, has sub-cent precision
///   or the balance would overflow
pub fn deposit(account: &mut Account, amount: Decimal) -> Result<Decimal, BankError> {
    validate_amount(amount)?;

    let new_balance = exact(account.balance.checked_add(amount), account.balance, amount)
        .ok_or_else(|| BankError::arithmetic_overflow("deposit", account.id.as_str()))?;

    account.balance = new_balance;
    account.log.push(Transaction::new(
        Utc::now(),
        TransactionKind::Deposit,
        amount,
        None,
        new_balance,
    ));

    Ok(new_balance)
}

/// Debit funds from an account
///
/// # Returns
///
/// * `Ok(Decimal)` - The new balance
/// * `Err(BankError)` - If the amount is not positive, has sub-cent precision
///   or exceeds the balance
pub fn withdraw(account: &mut Account, amount: Decimal) -> Result<Decimal, BankError> {
    validate_amount(amount)?;

    if amount > account.balance {
        return Err(BankError::insufficient_funds(
            account.id.as_str(),
            account.balance,
            amount,
        ));
    }

    let new_balance = exact(account.balance.checked_sub(amount), account.balance, amount)
        .ok_or_else(|| BankError::arithmetic_overflow("withdraw", account.id.as_str()))?;

    account.balance = new_balance;
    account.log.push(Transaction::new(
        Utc::now(),
        TransactionKind::Withdraw,
        amount,
        None,
        new_balance,
    ));

    Ok(new_balance)
}

/// Move funds from `source` to `destination`
///
/// Checks run in this order: amount, self transfer, funds, then rounding or
/// overflow of either balance. Both records share one timestamp and each carries
/// its own account's balance after the transfer.
///
/// # Returns
///
/// * `Ok(Decimal)` - The new balance of the source account
/// * `Err(BankError)` - If any check fails; neither account is modified
pub fn transfer(
    source: &mut Account,
    destination: &mut Account,
    amount: Decimal,
) -> Result<Decimal, BankError> {
    validate_amount(amount)?;

    if source.id == destination.id {
        return Err(BankError::self_transfer(source.id.as_str()));
    }

    if amount > source.balance {
        return Err(BankError::insufficient_funds(
            source.id.as_str(),
            source.balance,
            amount,
        ));
    }

    let new_source_balance = exact(source.balance.checked_sub(amount), source.balance, amount)
        .ok_or_else(|| BankError::arithmetic_overflow("transfer", source.id.as_str()))?;
    let new_destination_balance = exact(
        destination.balance.checked_add(amount),
        destination.balance,
        amount,
    )
    .ok_or_else(|| BankError::arithmetic_overflow("transfer", destination.id.as_str()))?;

    let timestamp = Utc::now();

    source.balance = new_source_balance;
    destination.balance = new_destination_balance;

    source.log.push(Transaction::new(
        timestamp,
        TransactionKind::TransferOut,
        amount,
        Some(destination.id.clone()),
        new_source_balance,
    ));
    destination.log.push(Transaction::new(
        timestamp,
        TransactionKind::TransferIn,
        amount,
        Some(source.id.clone()),
        new_destination_balance,
    ));

    Ok(new_source_balance)
}

/// Record the opening balance of a freshly registered account
///
/// Nothing is recorded for a zero opening balance.
pub(crate) fn record_opening_balance(account: &mut Account) {
    if account.balance > Decimal::ZERO {
        account.log.push(Transaction::new(
            Utc::now(),
            TransactionKind::Deposit,
            account.balance,
            None,
            account.balance,
        ));
    }
}
