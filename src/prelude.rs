//! Warden prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    clock::{Clock, FixedClock, SystemClock},
    config::{PasswordConfig, TokenConfig, Validation},
    password::{CostPolicy, PasswordError, PasswordHasher, is_well_formed},
    random::{OsRandom, RandomSource},
    secrets::{
        InMemorySecretRepository, Secret, SecretRepository, SecretRotation, SecretStoreError,
        SecretValue,
    },
    token::{IssuedToken, TokenCodec, TokenError, TokenErrorClass, VerifiedToken},
};
