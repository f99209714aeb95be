use crate::core::IdGenerator;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Interactive in-memory ATM simulator
#[derive(Parser, Debug)]
#[command(name = "atm-ledger")]
#[command(about = "Interactive in-memory ATM simulator", long_about = None)]
pub struct CliArgs {
    /// Account store backing the session
    #[arg(
        long = "backend",
        value_name = "BACKEND",
        default_value = "sync",
        env = "ATM_BACKEND",
        help = "Account store: 'sync' for single-threaded or 'concurrent' for the thread-safe store"
    )]
    pub backend: BackendType,

    /// CSV file of accounts to load at startup
    #[arg(
        long = "seed-file",
        value_name = "CSV",
        env = "ATM_SEED_FILE",
        help = "CSV file with columns user_id,pin,name,balance to pre-seed accounts"
    )]
    pub seed_file: Option<PathBuf>,

    /// Skip the built-in sample accounts
    #[arg(
        long = "no-sample-accounts",
        help = "Do not create the sample accounts when no seed file is given"
    )]
    pub no_sample_accounts: bool,

    /// Seed for identifier generation
    #[arg(
        long = "id-seed",
        value_name = "SEED",
        help = "Seed the account identifier generator for reproducible sessions"
    )]
    pub id_seed: Option<u64>,

    /// Log filter directive
    #[arg(
        long = "log-level",
        value_name = "FILTER",
        help = "Log filter, e.g. 'info' or 'atm_ledger=debug' (default: RUST_LOG or 'warn')"
    )]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long = "log-json", help = "Write logs to stderr as JSON lines")]
    pub log_json: bool,
}

/// Available account store backends
#[derive(Clone, Debug, PartialEq, ValueEnum)]
pub enum BackendType {
    Sync,
    Concurrent,
}

impl CliArgs {
    /// Build the identifier generator selected by the arguments
    pub fn id_generator(&self) -> IdGenerator {
        match self.id_seed {
            Some(seed) => IdGenerator::seeded(seed),
            None => IdGenerator::new(),
        }
    }

    /// Whether the built-in sample accounts should be created
    ///
    /// A seed file replaces the samples.
    pub fn use_sample_accounts(&self) -> bool {
        self.seed_file.is_none() && !self.no_sample_accounts
    }
}
