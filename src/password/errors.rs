//! Password hashing errors.

use thiserror::Error;

/// Why a password could not be hashed.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Empty passwords are never hashed.
    #[error("password must not be empty")]
    EmptyPassword,

    /// The cost policy produced parameters argon2 refuses.
    #[error("invalid argon2 parameters: {0}")]
    InvalidParams(argon2::Error),

    /// The cost policy asks for more than a stored hash may carry.
    #[error("password cost exceeds the hard ceilings")]
    CostAboveCeiling,

    /// Key derivation failed.
    #[error("argon2 key derivation failed: {0}")]
    Derivation(argon2::Error),

    /// The encoded hash failed its structural check.
    #[error("derived hash is malformed")]
    MalformedHash,
}
