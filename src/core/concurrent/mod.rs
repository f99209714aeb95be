//! Concurrent implementations of core components
//!
//! This module provides a thread-safe account store using DashMap for the
//! identifier map and one mutex per account.
//!
//! # Thread Safety
//!
//! - Operations on different accounts proceed in parallel
//! - Operations on the same account are serialized by its mutex
//! - Transfers lock both accounts in ascending identifier order

pub mod account_store;

pub use account_store::{AccountHandle, ConcurrentAccountStore};
