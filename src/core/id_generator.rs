//! Account identifier generation
//!
//! Identifiers are random zero-padded numbers. Collisions are retried a
//! bounded number of times at each width; when a width keeps colliding the
//! identifier space is widened by one digit.

use crate::types::{AccountId, BankError, ACCOUNT_ID_WIDTH};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Attempts per width before widening
pub const MAX_ATTEMPTS_PER_WIDTH: usize = 32;

/// Widest identifier ever generated
pub const MAX_ACCOUNT_ID_WIDTH: usize = 12;

/// Random identifier source owned by an account store
#[derive(Debug)]
pub struct IdGenerator {
    rng: StdRng,
}

impl IdGenerator {
    /// Generator seeded from the operating system
    pub fn new() -> Self {
        IdGenerator {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator, for reproducible sessions and tests
    pub fn seeded(seed: u64) -> Self {
        IdGenerator {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A random identifier of the given width, ignoring collisions
    pub fn candidate(&mut self, width: usize) -> AccountId {
        let upper = 10u64.pow(width as u32);
        AccountId::from_number(self.rng.gen_range(0..upper), width)
    }

    /// Generate an identifier for which `is_taken` returns false
    ///
    /// # Errors
    ///
    /// Returns `IdentifierSpaceExhausted` when every attempt up to
    /// [`MAX_ACCOUNT_ID_WIDTH`] digits collided.
    pub fn generate<F>(&mut self, is_taken: F) -> Result<AccountId, BankError>
    where
        F: Fn(&AccountId) -> bool,
    {
        for width in ACCOUNT_ID_WIDTH..=MAX_ACCOUNT_ID_WIDTH {
            for _ in 0..MAX_ATTEMPTS_PER_WIDTH {
                let id = self.candidate(width);
                if !is_taken(&id) {
                    return Ok(id);
                }
                tracing::debug!(account = %id, "account identifier collision");
            }
            tracing::warn!(width, "identifier width saturated, widening");
        }

        Err(BankError::IdentifierSpaceExhausted {
            width: MAX_ACCOUNT_ID_WIDTH,
        })
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
