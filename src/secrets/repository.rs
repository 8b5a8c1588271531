//! Secret persistence boundary.

use std::sync::Mutex;

use async_trait::async_trait;
use mockall::automock;

use crate::secrets::{Secret, SecretStoreError};

/// Storage for signing secrets.
///
/// Implementations only need the atomicity of a single insert or select;
/// callers never assume inserts for the same key name are serialised.
#[automock]
#[async_trait]
pub trait SecretRepository: Send + Sync {
    /// Persist a newly minted secret.
    async fn insert(&self, secret: &Secret) -> Result<(), SecretStoreError>;

    /// Key id of the newest secret named `key_name` with
    /// `earliest_valid < created_at <= now`.
    async fn latest_valid(
        &self,
        key_name: &str,
        now: i64,
        earliest_valid: i64,
    ) -> Result<Option<String>, SecretStoreError>;

    /// Point lookup by key id.
    async fn find_by_key_id(&self, key_id: &str) -> Result<Option<Secret>, SecretStoreError>;
}

impl std::fmt::Debug for dyn SecretRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretRepository")
    }
}

/// Process-local secret storage.
#[derive(Debug, Default)]
pub struct InMemorySecretRepository {
    secrets: Mutex<Vec<Secret>>,
}

impl InMemorySecretRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored secrets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Secret>> {
        // A poisoned lock still holds a consistent Vec: every mutation is a single push.
        self.secrets
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl SecretRepository for InMemorySecretRepository {
    async fn insert(&self, secret: &Secret) -> Result<(), SecretStoreError> {
        let mut secrets = self.lock();

        if secrets.iter().any(|stored| stored.key_id == secret.key_id) {
            return Err(SecretStoreError::DuplicateKeyId);
        }

        secrets.push(secret.clone());

        Ok(())
    }

    async fn latest_valid(
        &self,
        key_name: &str,
        now: i64,
        earliest_valid: i64,
    ) -> Result<Option<String>, SecretStoreError> {
        Ok(self
            .lock()
            .iter()
            .filter(|secret| {
                secret.key_name == key_name
                    && secret.created_at <= now
                    && secret.created_at > earliest_valid
            })
            .max_by_key(|secret| secret.created_at)
            .map(|secret| secret.key_id.clone()))
    }

    async fn find_by_key_id(&self, key_id: &str) -> Result<Option<Secret>, SecretStoreError> {
        Ok(self
            .lock()
            .iter()
            .find(|secret| secret.key_id == key_id)
            .cloned())
    }
}
