//! Benchmark suite for the account stores
//!
//! Compares the single-threaded store with the concurrent store on the
//! operations a session performs most, using the divan benchmarking
//! framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```

use atm_ledger::core::IdGenerator;
use atm_ledger::{AccountId, AccountStore, ConcurrentAccountStore};
use rust_decimal::Decimal;

fn main() {
    divan::main();
}

fn sample_ids() -> (AccountId, AccountId) {
    (
        AccountId::parse("123456").expect("valid id"),
        AccountId::parse("654321").expect("valid id"),
    )
}

fn sync_store() -> AccountStore {
    let mut store = AccountStore::with_generator(IdGenerator::seeded(7));
    store.seed_samples().expect("Seeding failed");
    store
}

fn concurrent_store() -> ConcurrentAccountStore {
    let store = ConcurrentAccountStore::with_generator(IdGenerator::seeded(7));
    store.seed_samples().expect("Seeding failed");
    store
}

/// Deposit then withdraw the same amount on the single-threaded store
#[divan::bench(args = [100, 1_000])]
fn sync_deposit_withdraw(rounds: usize) {
    let mut store = sync_store();
    let (john, _) = sample_ids();
    let amount = Decimal::new(1050, 2);

    for _ in 0..rounds {
        store.deposit(&john, amount).expect("Deposit failed");
        store.withdraw(&john, amount).expect("Withdrawal failed");
    }
}

/// Deposit then withdraw the same amount on the concurrent store
#[divan::bench(args = [100, 1_000])]
fn concurrent_deposit_withdraw(rounds: usize) {
    let store = concurrent_store();
    let (john, _) = sample_ids();
    let amount = Decimal::new(1050, 2);

    for _ in 0..rounds {
        store.deposit(&john, amount).expect("Deposit failed");
        store.withdraw(&john, amount).expect("Withdrawal failed");
    }
}

/// Transfer back and forth between the sample accounts
#[divan::bench(args = [100, 1_000])]
fn sync_transfers(rounds: usize) {
    let mut store = sync_store();
    let (john, jane) = sample_ids();
    let amount = Decimal::new(25, 0);

    for _ in 0..rounds {
        store.transfer(&john, &jane, amount).expect("Transfer failed");
        store.transfer(&jane, &john, amount).expect("Transfer failed");
    }
}

/// Transfer back and forth between the sample accounts
#[divan::bench(args = [100, 1_000])]
fn concurrent_transfers(rounds: usize) {
    let store = concurrent_store();
    let (john, jane) = sample_ids();
    let amount = Decimal::new(25, 0);

    for _ in 0..rounds {
        store.transfer(&john, &jane, amount).expect("Transfer failed");
        store.transfer(&jane, &john, amount).expect("Transfer failed");
    }
}

/// Register accounts until the store holds the requested number
#[divan::bench(args = [100, 1_000])]
fn sync_registrations(accounts: usize) {
    let mut store = AccountStore::with_generator(IdGenerator::seeded(11));
    for _ in 0..accounts {
        store
            .register("1234", "Bench User", Decimal::new(100, 0))
            .expect("Registration failed");
    }
}

/// Register accounts from several threads at once
#[divan::bench(args = [100, 1_000])]
fn concurrent_registrations(accounts: usize) {
    let store = ConcurrentAccountStore::with_generator(IdGenerator::seeded(11));
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..accounts / 4 {
                    store
                        .register("1234", "Bench User", Decimal::new(100, 0))
                        .expect("Registration failed");
                }
            });
        }
    });
}
