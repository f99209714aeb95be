// CLI module
// Command-line arguments, backend selection and the interactive session

mod args;
pub mod session;

pub use args::{BackendType, CliArgs};
pub use session::Session;

use crate::core::{AccountStore, Bank, ConcurrentAccountStore};
use crate::io::seed_reader::{read_seed_file, seed_concurrent_store, seed_store};
use crate::types::BankError;
use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments or --help), clap prints the error or
/// help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Create the account store selected by the arguments
///
/// The store is pre-seeded from the seed file if one is given, otherwise
/// with the sample accounts unless they were disabled.
///
/// # Errors
///
/// Returns an error if the seed file cannot be read or contains an invalid
/// or duplicate account.
pub fn create_bank(args: &CliArgs) -> Result<Box<dyn Bank>, BankError> {
    let seeds = args
        .seed_file
        .as_deref()
        .map(read_seed_file)
        .transpose()?;

    match args.backend {
        BackendType::Sync => {
            let mut store = AccountStore::with_generator(args.id_generator());
            if let Some(seeds) = seeds {
                seed_store(&mut store, seeds)?;
            } else if args.use_sample_accounts() {
                store.seed_samples()?;
            }
            Ok(Box::new(store))
        }
        BackendType::Concurrent => {
            let store = ConcurrentAccountStore::with_generator(args.id_generator());
            if let Some(seeds) = seeds {
                seed_concurrent_store(&store, seeds)?;
            } else if args.use_sample_accounts() {
                store.seed_samples()?;
            }
            Ok(Box::new(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountId;
    use rstest::rstest;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["program"];
        argv.extend_from_slice(extra);
        CliArgs::try_parse_from(argv).unwrap()
    }

    #[rstest]
    fn test_create_bank_with_samples(#[values("sync", "concurrent")] backend: &str) {
        let bank = create_bank(&args(&["--backend", backend])).unwrap();
        let john = bank.summary(&AccountId::parse("123456").unwrap()).unwrap();
        assert_eq!(john.name, "John Doe");
    }

    #[rstest]
    fn test_create_bank_without_samples(#[values("sync", "concurrent")] backend: &str) {
        let bank = create_bank(&args(&["--backend", backend, "--no-sample-accounts"])).unwrap();
        assert!(bank.summary(&AccountId::parse("123456").unwrap()).is_none());
    }

    #[test]
    fn test_create_bank_missing_seed_file() {
        let result = create_bank(&args(&["--seed-file", "missing/accounts.csv"]));
        assert!(matches!(result, Err(BankError::FileNotFound { .. })));
    }
}
