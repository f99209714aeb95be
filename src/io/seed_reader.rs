//! Seed file reader
//!
//! Loads pre-existing accounts from a CSV file with the header
//! `user_id,pin,name,balance`. Rows are deserialized with serde and handed to
//! the store one at a time; the first invalid row aborts loading.
//!
//! ```text
//! user_id,pin,name,balance
//! 123456,1234,John Doe,5000
//! 654321,4321,Jane Smith,3000.50
//! ```

use crate::core::{AccountStore, ConcurrentAccountStore};
use crate::types::{AccountId, BankError, ACCOUNT_ID_WIDTH};
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// PIN and identifier are read as strings so leading zeros survive.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SeedRecord {
    pub user_id: String,
    pub pin: String,
    pub name: String,
    pub balance: String,
}

/// A validated seed row
#[derive(Debug, Clone, PartialEq)]
pub struct SeedAccount {
    pub id: AccountId,
    pub pin: String,
    pub name: String,
    pub balance: Decimal,
}

/// Convert a raw record into a seed account
///
/// Checks that the identifier is exactly six digits and the balance is a
/// decimal number. PIN, name and sign of the balance are checked by the store.
pub fn convert_seed_record(record: SeedRecord, line: Option<u64>) -> Result<SeedAccount, BankError> {
    let id = AccountId::parse(&record.user_id)?;
    if id.as_str().len() != ACCOUNT_ID_WIDTH {
        return Err(BankError::ParseError {
            line,
            message: format!(
                "user_id '{}' must be exactly {} digits",
                record.user_id, ACCOUNT_ID_WIDTH
            ),
        });
    }

    let balance = Decimal::from_str(record.balance.trim()).map_err(|_| BankError::ParseError {
        line,
        message: format!("invalid balance '{}'", record.balance),
    })?;

    Ok(SeedAccount {
        id,
        pin: record.pin,
        name: record.name,
        balance,
    })
}

/// Read every seed account from a CSV source
pub fn read_seed_accounts<R: Read>(source: R) -> Result<Vec<SeedAccount>, BankError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(source);

    let mut accounts = Vec::new();
    for result in reader.deserialize::<SeedRecord>() {
        let record = result?;
        // Header is line 1, so the first data row is line 2
        let line = Some(accounts.len() as u64 + 2);
        accounts.push(convert_seed_record(record, line)?);
    }
    Ok(accounts)
}

/// Open and read a seed file
///
/// # Errors
///
/// Returns `FileNotFound` if the path does not exist, `IoError` for other
/// open failures and `ParseError` for malformed rows.
pub fn read_seed_file(path: &Path) -> Result<Vec<SeedAccount>, BankError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => BankError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => BankError::from(e),
    })?;
    read_seed_accounts(file)
}

/// Load seed accounts into a single-threaded store
pub fn seed_store(store: &mut AccountStore, accounts: Vec<SeedAccount>) -> Result<usize, BankError> {
    let count = accounts.len();
    for seed in accounts {
        store.insert_seeded(seed.id, &seed.pin, &seed.name, seed.balance)?;
    }
    tracing::info!(count, "seed accounts loaded");
    Ok(count)
}

/// Load seed accounts into a concurrent store
pub fn seed_concurrent_store(
    store: &ConcurrentAccountStore,
    accounts: Vec<SeedAccount>,
) -> Result<usize, BankError> {
    let count = accounts.len();
    for seed in accounts {
        store.insert_seeded(seed.id, &seed.pin, &seed.name, seed.balance)?;
    }
    tracing::info!(count, "seed accounts loaded");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_seed_accounts() {
        let input = "user_id,pin,name,balance\n000123,0042,Ada Lovelace,100.50\n777777,1234,  Alan Turing ,0\n";

        let accounts = read_seed_accounts(input.as_bytes()).unwrap();

        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].id.as_str(), "000123");
        assert_eq!(accounts[0].pin, "0042");
        assert_eq!(accounts[0].balance, Decimal::new(10050, 2));
        assert_eq!(accounts[1].name, "Alan Turing");
    }

    #[rstest]
    #[case::short_id("user_id,pin,name,balance\n123,1234,A,1\n", "must be exactly 6 digits")]
    #[case::bad_balance("user_id,pin,name,balance\n123456,1234,A,lots\n", "invalid balance")]
    #[case::missing_column("user_id,pin,name,balance\n123456,1234,A\n", "CSV parse error")]
    fn test_read_seed_accounts_errors(#[case] input: &str, #[case] expected: &str) {
        let error = read_seed_accounts(input.as_bytes()).unwrap_err();
        assert!(
            error.to_string().contains(expected),
            "unexpected error: {}",
            error
        );
    }

    #[test]
    fn test_bad_balance_reports_line() {
        let input = "user_id,pin,name,balance\n123456,1234,A,1\n654321,1234,B,x\n";
        assert!(matches!(
            read_seed_accounts(input.as_bytes()),
            Err(BankError::ParseError { line: Some(3), .. })
        ));
    }

    #[test]
    fn test_read_seed_file_missing() {
        let result = read_seed_file(Path::new("does/not/exist.csv"));
        assert!(matches!(result, Err(BankError::FileNotFound { .. })));
    }

    #[test]
    fn test_seed_store_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "user_id,pin,name,balance").unwrap();
        writeln!(file, "111111,1111,One,10").unwrap();
        writeln!(file, "222222,2222,Two,20").unwrap();
        file.flush().unwrap();

        let accounts = read_seed_file(file.path()).unwrap();
        let mut store = AccountStore::new();
        assert_eq!(seed_store(&mut store, accounts).unwrap(), 2);

        let two = store.lookup(&AccountId::parse("222222").unwrap()).unwrap();
        assert_eq!(two.balance(), Decimal::new(20, 0));
        assert_eq!(two.transaction_count(), 0);
    }

    #[rstest]
    #[case::bad_pin("111111,11a1,One,10\n")]
    #[case::blank_name("111111,1111,   ,10\n")]
    #[case::negative_balance("111111,1111,One,-10\n")]
    #[case::sub_cent_balance("111111,1111,One,10.005\n")]
    #[case::duplicate("111111,1111,One,10\n111111,2222,Two,20\n")]
    fn test_seed_store_rejects_invalid_rows(#[case] rows: &str) {
        let input = format!("user_id,pin,name,balance\n{}", rows);
        let accounts = read_seed_accounts(input.as_bytes()).unwrap();

        let store = ConcurrentAccountStore::new();
        assert!(seed_concurrent_store(&store, accounts).is_err());
    }
}
