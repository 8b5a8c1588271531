//! Secret models.

use std::fmt;

use zeroize::Zeroize;

/// Signing key material. Never printed, zeroed on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretValue {
    value: String,
}

impl SecretValue {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.value.as_bytes()
    }

    /// Raw text form, for persistence adapters only.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretValue(**redacted**)")
    }
}

impl Drop for SecretValue {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

/// A named, versioned signing key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secret {
    /// Logical purpose, e.g. `token-signing`.
    pub key_name: String,

    /// Random identifier embedded in tokens as `kid`.
    pub key_id: String,

    /// Key material.
    pub value: SecretValue,

    /// Unix seconds at which the secret was minted.
    pub created_at: i64,
}
