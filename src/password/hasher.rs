//! Argon2id password hashing.

use std::sync::Arc;

use argon2::{Algorithm, Argon2, Version};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::{
    codec::constant_time_eq,
    password::{
        CostParams, CostPolicy, PasswordError,
        encoded::{Alphabet, EncodedHash},
        is_well_formed,
    },
    random::RandomSource,
};

/// Salt bytes per hash.
pub const SALT_BYTES: usize = 64;

/// Derived key bytes per new hash.
pub const KEY_BYTES: usize = 16;

/// Largest memory cost, in KiB, a stored hash may ask for.
pub const MAX_MEMORY_KIB: u32 = 4 * 1024 * 1024;

/// Largest iteration count a stored hash may ask for.
pub const MAX_TIME_COST: u32 = 64;

/// Largest lane count a stored hash may ask for.
pub const MAX_PARALLELISM: u32 = 255;

/// Largest derived key, in bytes, a stored hash may carry.
pub const MAX_KEY_BYTES: usize = 1024;

/// Derives and confirms Argon2id password hashes.
///
/// Both operations are CPU and memory heavy; callers running on an async
/// runtime should move them to a blocking pool and bound their concurrency.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    policy: CostPolicy,
    random: Arc<dyn RandomSource>,
}

impl PasswordHasher {
    /// Create a hasher.
    #[must_use]
    pub fn new(policy: CostPolicy, random: Arc<dyn RandomSource>) -> Self {
        Self { policy, random }
    }

    /// Cost policy new hashes are derived under.
    #[must_use]
    pub const fn policy(&self) -> &CostPolicy {
        &self.policy
    }

    /// Hash `password` at cost `level`, 0 meaning the policy default.
    ///
    /// Every call draws a fresh salt, so equal passwords never produce equal
    /// strings.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::EmptyPassword`] for an empty password,
    /// [`PasswordError::CostAboveCeiling`] when the policy yields parameters
    /// [`confirm`](Self::confirm) would refuse, or an argon2 failure if the
    /// policy yields parameters argon2 refuses.
    pub fn derive(&self, password: &str, level: u32) -> Result<String, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::EmptyPassword);
        }

        let params = self.policy.params(level);

        if exceeds_ceilings(params, KEY_BYTES) {
            return Err(PasswordError::CostAboveCeiling);
        }

        let mut salt = vec![0_u8; SALT_BYTES];
        self.random.fill_bytes(&mut salt);

        let key = derive_key(password.as_bytes(), &salt, Version::V0x13, params, KEY_BYTES)?;

        let hash = EncodedHash {
            version: Version::V0x13,
            params,
            salt,
            key: key.to_vec(),
            alphabet: Alphabet::UrlSafe,
        }
        .encode();

        if !is_well_formed(&hash) {
            return Err(PasswordError::MalformedHash);
        }

        Ok(hash)
    }

    /// Whether `candidate` is the password behind `hash`.
    ///
    /// Never fails: empty input, a string that does not parse, or parameters
    /// above the hard ceilings all yield `false` without running the KDF.
    #[must_use]
    pub fn confirm(&self, candidate: &str, hash: &str) -> bool {
        if candidate.is_empty() || hash.is_empty() || !is_well_formed(hash) {
            return false;
        }

        let Some(stored) = EncodedHash::parse(hash) else {
            debug!("stored password hash does not parse");

            return false;
        };

        if exceeds_ceilings(stored.params, stored.key.len()) {
            warn!(
                time_cost = stored.params.time_cost,
                memory_cost = stored.params.memory_cost,
                parallelism = stored.params.parallelism,
                "stored password hash exceeds cost ceilings"
            );

            return false;
        }

        let key = match derive_key(
            candidate.as_bytes(),
            &stored.salt,
            stored.version,
            stored.params,
            stored.key.len(),
        ) {
            Ok(key) => key,
            Err(error) => {
                debug!(%error, "stored password hash has unusable parameters");

                return false;
            }
        };

        let keys_match = constant_time_eq(&key, &stored.key);

        let rebuilt = EncodedHash {
            key: key.to_vec(),
            ..stored
        }
        .encode();

        let strings_match = constant_time_eq(rebuilt.as_bytes(), hash.as_bytes());

        keys_match & strings_match
    }
}

fn exceeds_ceilings(params: CostParams, key_len: usize) -> bool {
    params.memory_cost > MAX_MEMORY_KIB
        || params.time_cost > MAX_TIME_COST
        || params.parallelism > MAX_PARALLELISM
        || key_len > MAX_KEY_BYTES
}

fn derive_key(
    password: &[u8],
    salt: &[u8],
    version: Version,
    params: CostParams,
    key_len: usize,
) -> Result<Zeroizing<Vec<u8>>, PasswordError> {
    let params = params.argon2(key_len).map_err(PasswordError::InvalidParams)?;

    let mut key = Zeroizing::new(vec![0_u8; key_len]);

    Argon2::new(Algorithm::Argon2id, version, params)
        .hash_password_into(password, salt, &mut key)
        .map_err(PasswordError::Derivation)?;

    Ok(key)
}
