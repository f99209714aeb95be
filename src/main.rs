//! ATM Ledger CLI
//!
//! Interactive in-memory ATM simulator.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --backend concurrent
//! cargo run -- --seed-file accounts.csv --log-level info
//! ```
//!
//! The program reads menu choices from stdin and writes the session to
//! stdout. Logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Session ended normally
//! - 1: Error (unreadable seed file, invalid seed account, I/O failure)

use atm_ledger::cli::{self, Session};
use atm_ledger::telemetry;
use std::io;
use std::process;

fn main() {
    let args = cli::parse_args();
    telemetry::init(args.log_level.as_deref(), args.log_json);

    let mut bank = match cli::create_bank(&args) {
        Ok(bank) => bank,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut session = Session::new(bank.as_mut(), stdin.lock(), io::stdout());
    if let Err(e) = session.run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
