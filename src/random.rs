//! Randomness source used for salts, key material and identifiers.

use std::fmt::Debug;

use rand::{RngCore, rngs::OsRng};

/// Cryptographically secure random byte generator.
pub trait RandomSource: Debug + Send + Sync {
    /// Fill `dest` with random bytes.
    fn fill_bytes(&self, dest: &mut [u8]);
}

/// Operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest);
    }
}
