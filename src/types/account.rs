//! Account-related types for the ATM ledger
//!
//! This module defines the Account structure, its identifier type and the
//! credential checks applied when an account is opened.

use super::error::BankError;
use super::transaction::Transaction;
use rust_decimal::Decimal;
use std::fmt;

/// Width of freshly generated account identifiers
pub const ACCOUNT_ID_WIDTH: usize = 6;

/// Number of digits in a PIN
pub const PIN_LENGTH: usize = 4;

/// Most decimal places an amount or balance may carry
pub const AMOUNT_DECIMAL_PLACES: u32 = 2;

/// Field name reported when an opening balance is rejected
pub const INITIAL_DEPOSIT_FIELD: &str = "initial_deposit";

/// Account identifier
///
/// A zero-padded numeric string. Ordering is used to lock accounts in a
/// fixed global order in the concurrent store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(String);

impl AccountId {
    /// Build an identifier from a number, zero-padded to `width` digits
    pub fn from_number(number: u64, width: usize) -> Self {
        AccountId(format!("{:0width$}", number, width = width))
    }

    /// Parse a user-supplied identifier
    ///
    /// Only non-empty ASCII digit strings are accepted. Width is not enforced
    /// here so identifiers from a widened space still resolve.
    pub fn parse(raw: &str) -> Result<Self, BankError> {
        let raw = raw.trim();
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BankError::validation(
                "user_id",
                "must be a non-empty string of digits",
            ));
        }
        Ok(AccountId(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check that a PIN is exactly four ASCII digits
pub fn validate_pin(pin: &str) -> Result<(), BankError> {
    if pin.len() != PIN_LENGTH || !pin.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BankError::validation("pin", "must be exactly 4 digits"));
    }
    Ok(())
}

/// Check that a display name is not blank, returning it trimmed
pub fn validate_name(name: &str) -> Result<&str, BankError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(BankError::validation("name", "cannot be empty"));
    }
    Ok(trimmed)
}

/// Whether an amount has more significant decimal places than a balance may hold
///
/// Trailing zeros do not count, so `10.500` is accepted.
pub fn exceeds_precision(amount: Decimal) -> bool {
    amount.normalize().scale() > AMOUNT_DECIMAL_PLACES
}

/// Check that an opening balance is not negative and has at most two decimals
pub fn validate_opening_balance(amount: Decimal) -> Result<(), BankError> {
    if amount < Decimal::ZERO {
        return Err(BankError::validation(
            INITIAL_DEPOSIT_FIELD,
            "cannot be negative",
        ));
    }
    if exceeds_precision(amount) {
        return Err(BankError::validation(
            INITIAL_DEPOSIT_FIELD,
            "cannot have more than 2 decimal places",
        ));
    }
    Ok(())
}

/// Customer account
///
/// Holds the credential, the current balance and the transaction log.
/// The log is kept oldest-first; [`crate::core::history`] reverses it for
/// display. Balance and log only change through [`crate::core::ledger`].
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Unique account identifier
    pub id: AccountId,

    /// Four-digit PIN, compared in plain text
    pin: String,

    /// Display name of the account holder
    pub name: String,

    /// Current balance, never negative
    pub(crate) balance: Decimal,

    /// Recorded transactions, oldest first
    pub(crate) log: Vec<Transaction>,
}

impl Account {
    /// Create an account with the given opening balance and an empty log
    ///
    /// Inputs are expected to be validated by the caller; see
    /// [`validate_pin`], [`validate_name`] and [`validate_opening_balance`].
    pub fn new(id: AccountId, pin: &str, name: &str, balance: Decimal) -> Self {
        Account {
            id,
            pin: pin.to_string(),
            name: name.to_string(),
            balance,
            log: Vec::new(),
        }
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Whether the supplied PIN matches this account's credential
    pub fn pin_matches(&self, pin: &str) -> bool {
        self.pin == pin
    }

    /// Number of recorded transactions
    pub fn transaction_count(&self) -> usize {
        self.log.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::four_digits("1234", true)]
    #[case::leading_zero("0007", true)]
    #[case::letter("12a4", false)]
    #[case::too_short("123", false)]
    #[case::too_long("12345", false)]
    #[case::empty("", false)]
    #[case::unicode_digits("١٢٣٤", false)]
    fn test_validate_pin(#[case] pin: &str, #[case] valid: bool) {
        assert_eq!(validate_pin(pin).is_ok(), valid);
    }

    #[rstest]
    #[case::empty("")]
    #[case::spaces("   ")]
    #[case::tab_newline("\t\n")]
    fn test_validate_name_rejects_blank(#[case] name: &str) {
        assert!(matches!(
            validate_name(name),
            Err(BankError::Validation { .. })
        ));
    }

    #[test]
    fn test_validate_name_trims() {
        assert_eq!(validate_name("  Ada Lovelace ").unwrap(), "Ada Lovelace");
    }

    #[rstest]
    #[case::zero(Decimal::ZERO, true)]
    #[case::positive(Decimal::new(1050, 2), true)]
    #[case::negative(Decimal::new(-1, 2), false)]
    #[case::trailing_zeros(Decimal::new(10500, 3), true)]
    #[case::sub_cent(Decimal::new(10505, 3), false)]
    fn test_validate_opening_balance(#[case] amount: Decimal, #[case] valid: bool) {
        assert_eq!(validate_opening_balance(amount).is_ok(), valid);
    }

    #[rstest]
    #[case::whole(Decimal::new(5000, 0), false)]
    #[case::cents(Decimal::new(1999, 2), false)]
    #[case::trailing_zeros(Decimal::new(12000, 4), false)]
    #[case::tenth_of_cent(Decimal::new(1, 3), true)]
    #[case::smallest(Decimal::new(1, 28), true)]
    fn test_exceeds_precision(#[case] amount: Decimal, #[case] expected: bool) {
        assert_eq!(exceeds_precision(amount), expected);
    }

    #[rstest]
    #[case(42, 6, "000042")]
    #[case(999_999, 6, "999999")]
    #[case(5, 7, "0000005")]
    fn test_account_id_from_number(#[case] number: u64, #[case] width: usize, #[case] expected: &str) {
        assert_eq!(AccountId::from_number(number, width).as_str(), expected);
    }

    #[rstest]
    #[case::plain("123456", Some("123456"))]
    #[case::padded(" 654321 ", Some("654321"))]
    #[case::letters("12ab56", None)]
    #[case::empty("", None)]
    fn test_account_id_parse(#[case] raw: &str, #[case] expected: Option<&str>) {
        let parsed = AccountId::parse(raw).ok();
        assert_eq!(parsed.as_ref().map(AccountId::as_str), expected);
    }

    #[test]
    fn test_new_account_has_empty_log() {
        let account = Account::new(
            AccountId::from_number(1, 6),
            "1234",
            "John Doe",
            Decimal::new(5000, 0),
        );
        assert_eq!(account.balance(), Decimal::new(5000, 0));
        assert_eq!(account.transaction_count(), 0);
        assert!(account.pin_matches("1234"));
        assert!(!account.pin_matches("4321"));
    }
}
