//! I/O module
//!
//! Handles everything that crosses the process boundary.
//!
//! # Components
//!
//! - `seed_reader` - Loading pre-existing accounts from a CSV seed file
//! - `csv_format` - CSV export of an account's history
//! - `display` - Text formatting and amount parsing for the interactive session

pub mod csv_format;
pub mod display;
pub mod seed_reader;

pub use csv_format::{write_statement_csv, StatementRow};
pub use display::{format_amount, history_table, money, parse_amount, user_message};
pub use seed_reader::{read_seed_accounts, read_seed_file, SeedAccount, SeedRecord};
