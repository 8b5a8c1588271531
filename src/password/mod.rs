//! Memory-hard password hashing.

mod encoded;
mod errors;
mod hasher;
mod params;
mod validate;

pub use errors::PasswordError;
pub use hasher::{
    KEY_BYTES, MAX_KEY_BYTES, MAX_MEMORY_KIB, MAX_PARALLELISM, MAX_TIME_COST, PasswordHasher,
    SALT_BYTES,
};
pub use params::{CostParams, CostPolicy};
pub use validate::{MIN_HASH_LEN, is_well_formed};
