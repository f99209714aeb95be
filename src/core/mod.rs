//! Core business logic module
//!
//! This module contains the account ledger components:
//! - `traits` - The `Bank` abstraction shared by both stores
//! - `ledger` - Validated deposit, withdrawal and transfer operations
//! - `history` - Newest-first view over an account's transactions
//! - `id_generator` - Bounded random account identifier generation
//! - `account_store` - Single-threaded account store
//! - `concurrent` - Thread-safe account store

pub mod account_store;
pub mod concurrent;
pub mod history;
pub mod id_generator;
pub mod ledger;
pub mod traits;

pub use account_store::AccountStore;
pub use concurrent::{AccountHandle, ConcurrentAccountStore};
pub use history::{history, History};
pub use id_generator::IdGenerator;
pub use traits::{AccountSummary, Bank};
