//! Secret rotation.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::{
    codec::random_text,
    random::RandomSource,
    secrets::{Secret, SecretRepository, SecretStoreError, SecretValue},
};

/// Random bytes behind each generated key id.
pub const KEY_ID_BYTES: usize = 16;

/// Random bytes behind each generated secret value.
pub const SECRET_VALUE_BYTES: usize = 128;

/// Issues and resolves versioned signing secrets.
///
/// Old secrets are never removed here, so a token signed moments before a
/// rotation keeps verifying until it expires on its own.
#[derive(Debug, Clone)]
pub struct SecretRotation {
    repository: Arc<dyn SecretRepository>,
    random: Arc<dyn RandomSource>,
}

impl SecretRotation {
    #[must_use]
    pub fn new(repository: Arc<dyn SecretRepository>, random: Arc<dyn RandomSource>) -> Self {
        Self { repository, random }
    }

    /// Key id of the current signing secret for `key_name`, minting a new
    /// secret when none was created within the last `validity_window` seconds.
    ///
    /// Concurrent callers racing past an expiry may each mint a key; both
    /// remain valid and resolvable.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty key name, a non-positive window, or any
    /// persistence failure. No fallback key is ever substituted.
    pub async fn current_key_id(
        &self,
        key_name: &str,
        now: i64,
        validity_window: i64,
    ) -> Result<String, SecretStoreError> {
        if key_name.is_empty() {
            return Err(SecretStoreError::InvalidKeyName);
        }

        if validity_window <= 0 {
            return Err(SecretStoreError::InvalidValidityWindow(validity_window));
        }

        let earliest_valid = now.saturating_sub(validity_window);

        let current = self
            .repository
            .latest_valid(key_name, now, earliest_valid)
            .await
            .inspect_err(|source| error!(key_name, "failed to query signing secrets: {source}"))?;

        if let Some(key_id) = current {
            debug!(key_name, %key_id, "using current signing secret");

            return Ok(key_id);
        }

        let secret = Secret {
            key_name: key_name.to_string(),
            key_id: random_text(self.random.as_ref(), KEY_ID_BYTES),
            value: SecretValue::new(random_text(self.random.as_ref(), SECRET_VALUE_BYTES)),
            created_at: now,
        };

        self.add(&secret).await?;

        info!(key_name, key_id = %secret.key_id, "minted signing secret");

        Ok(secret.key_id.clone())
    }

    /// Secret value for `key_id`, if it exists under `key_name` and is non-empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup itself fails.
    pub async fn resolve(
        &self,
        key_name: &str,
        key_id: &str,
    ) -> Result<Option<SecretValue>, SecretStoreError> {
        if key_id.is_empty() {
            return Ok(None);
        }

        let secret = self
            .repository
            .find_by_key_id(key_id)
            .await
            .inspect_err(|source| error!(key_name, "failed to resolve signing secret: {source}"))?;

        Ok(secret
            .filter(|secret| secret.key_name == key_name && !secret.value.is_empty())
            .map(|secret| secret.value))
    }

    /// Persist a secret.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty key name or when the insert fails.
    pub async fn add(&self, secret: &Secret) -> Result<(), SecretStoreError> {
        if secret.key_name.is_empty() {
            return Err(SecretStoreError::InvalidKeyName);
        }

        self.repository
            .insert(secret)
            .await
            .inspect_err(|source| {
                error!(
                    key_name = %secret.key_name,
                    key_id = %secret.key_id,
                    "failed to store signing secret: {source}"
                );
            })
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use testresult::TestResult;

    use super::*;
    use crate::{
        random::OsRandom,
        secrets::{InMemorySecretRepository, MockSecretRepository},
    };

    const NOW: i64 = 1_700_000_000;
    const WINDOW: i64 = 3_600;

    fn rotation(repository: impl SecretRepository + 'static) -> SecretRotation {
        SecretRotation::new(Arc::new(repository), Arc::new(OsRandom))
    }

    #[tokio::test]
    async fn current_key_id_mints_on_first_use_and_reuses_afterwards() -> TestResult {
        let repository = Arc::new(InMemorySecretRepository::new());
        let rotation = SecretRotation::new(repository.clone(), Arc::new(OsRandom));

        let first = rotation.current_key_id("jwt", NOW, WINDOW).await?;
        let second = rotation.current_key_id("jwt", NOW + 10, WINDOW).await?;

        assert_eq!(first, second, "key should be reused inside the window");
        assert_eq!(repository.len(), 1);
        assert_eq!(first.len(), 22, "16 random bytes, base64url");

        Ok(())
    }

    #[tokio::test]
    async fn current_key_id_rotates_after_window() -> TestResult {
        let repository = Arc::new(InMemorySecretRepository::new());
        let rotation = SecretRotation::new(repository.clone(), Arc::new(OsRandom));

        let first = rotation.current_key_id("jwt", NOW, WINDOW).await?;
        let rotated = rotation.current_key_id("jwt", NOW + WINDOW, WINDOW).await?;

        assert_ne!(first, rotated, "key should rotate once it ages out");
        assert_eq!(repository.len(), 2);

        // The superseded key still resolves.
        assert!(rotation.resolve("jwt", &first).await?.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn resolve_ignores_other_key_names() -> TestResult {
        let rotation = rotation(InMemorySecretRepository::new());

        let key_id = rotation.current_key_id("jwt", NOW, WINDOW).await?;

        assert!(rotation.resolve("jwt", &key_id).await?.is_some());
        assert!(rotation.resolve("refresh", &key_id).await?.is_none());
        assert!(rotation.resolve("jwt", "unknown").await?.is_none());
        assert!(rotation.resolve("jwt", "").await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn resolve_treats_empty_value_as_absent() -> TestResult {
        let rotation = rotation(InMemorySecretRepository::new());

        rotation
            .add(&Secret {
                key_name: "jwt".to_string(),
                key_id: "empty".to_string(),
                value: SecretValue::new(""),
                created_at: NOW,
            })
            .await?;

        assert!(rotation.resolve("jwt", "empty").await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn current_key_id_propagates_insert_failure() {
        let mut repository = MockSecretRepository::new();

        repository
            .expect_latest_valid()
            .returning(|_, _, _| Ok(None));
        repository
            .expect_insert()
            .returning(|_| Err(SecretStoreError::backend(io::Error::other("disk full"))));

        let result = rotation(repository).current_key_id("jwt", NOW, WINDOW).await;

        assert!(
            matches!(result, Err(SecretStoreError::Backend(_))),
            "expected Backend error, got {result:?}"
        );
    }

    #[tokio::test]
    async fn current_key_id_propagates_query_failure() {
        let mut repository = MockSecretRepository::new();

        repository
            .expect_latest_valid()
            .returning(|_, _, _| Err(SecretStoreError::backend(io::Error::other("timeout"))));
        repository.expect_insert().never();

        let result = rotation(repository).current_key_id("jwt", NOW, WINDOW).await;

        assert!(result.is_err(), "query failure must not mint a key");
    }

    #[tokio::test]
    async fn current_key_id_queries_with_window_bounds() -> TestResult {
        let mut repository = MockSecretRepository::new();

        repository
            .expect_latest_valid()
            .withf(|key_name, now, earliest| {
                key_name == "jwt" && *now == NOW && *earliest == NOW - WINDOW
            })
            .returning(|_, _, _| Ok(Some("existing".to_string())));

        let key_id = rotation(repository).current_key_id("jwt", NOW, WINDOW).await?;

        assert_eq!(key_id, "existing");

        Ok(())
    }

    #[tokio::test]
    async fn current_key_id_rejects_bad_arguments() {
        let rotation = rotation(InMemorySecretRepository::new());

        assert!(matches!(
            rotation.current_key_id("", NOW, WINDOW).await,
            Err(SecretStoreError::InvalidKeyName)
        ));
        assert!(matches!(
            rotation.current_key_id("jwt", NOW, 0).await,
            Err(SecretStoreError::InvalidValidityWindow(0))
        ));
    }

    #[tokio::test]
    async fn concurrent_minting_leaves_every_key_resolvable() -> TestResult {
        let repository = Arc::new(InMemorySecretRepository::new());
        let rotation = SecretRotation::new(repository.clone(), Arc::new(OsRandom));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let rotation = rotation.clone();
                tokio::spawn(async move { rotation.current_key_id("jwt", NOW, WINDOW).await })
            })
            .collect();

        for handle in handles {
            let key_id = handle.await??;

            assert!(rotation.resolve("jwt", &key_id).await?.is_some());
        }

        Ok(())
    }
}
