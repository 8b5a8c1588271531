//! Secret store errors.

use std::error::Error as StdError;

use thiserror::Error;

/// Errors raised by the secret rotation store.
#[derive(Debug, Error)]
pub enum SecretStoreError {
    /// An empty key name was supplied.
    #[error("key name must not be empty")]
    InvalidKeyName,

    /// The validity window was zero or negative.
    #[error("key validity window must be positive, got {0}s")]
    InvalidValidityWindow(i64),

    /// A secret with the same key id is already stored.
    #[error("a secret with this key id already exists")]
    DuplicateKeyId,

    /// The persistence backend failed.
    #[error("secret storage error")]
    Backend(#[source] Box<dyn StdError + Send + Sync>),
}

impl SecretStoreError {
    /// Wrap a persistence backend error.
    pub fn backend(error: impl StdError + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(error))
    }
}
