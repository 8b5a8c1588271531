//! Bounded password hashing on the blocking pool.

use std::sync::Arc;

use tokio::{sync::Semaphore, task};
use tracing::debug;
use warden::password::PasswordHasher;
use zeroize::Zeroizing;

use crate::auth::AuthServiceError;

/// Runs Argon2id work off the async runtime, at most `max_concurrency` at a time.
#[derive(Debug, Clone)]
pub struct PasswordWorkers {
    hasher: PasswordHasher,
    permits: Arc<Semaphore>,
}

impl PasswordWorkers {
    /// Wrap `hasher`; a `max_concurrency` of zero is treated as one.
    #[must_use]
    pub fn new(hasher: PasswordHasher, max_concurrency: usize) -> Self {
        Self {
            hasher,
            permits: Arc::new(Semaphore::new(max_concurrency.max(1))),
        }
    }

    /// Hash `password` at `cost_level`.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails or the worker cannot run.
    pub async fn derive(&self, password: &str, cost_level: u32) -> Result<String, AuthServiceError> {
        let password = Zeroizing::new(password.to_owned());

        self.run(move |hasher| hasher.derive(&password, cost_level))
            .await?
            .map_err(AuthServiceError::from)
    }

    /// Check `password` against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error only if the worker cannot run.
    pub async fn confirm(&self, password: &str, hash: &str) -> Result<bool, AuthServiceError> {
        let password = Zeroizing::new(password.to_owned());
        let hash = hash.to_owned();

        self.run(move |hasher| hasher.confirm(&password, &hash)).await
    }

    async fn run<T, F>(&self, work: F) -> Result<T, AuthServiceError>
    where
        T: Send + 'static,
        F: FnOnce(&PasswordHasher) -> T + Send + 'static,
    {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(AuthServiceError::Unavailable)?;

        debug!(
            available = self.permits.available_permits(),
            "running password work"
        );

        let hasher = self.hasher.clone();

        // The permit moves into the task so it is held until the work ends,
        // even if the caller stops waiting.
        task::spawn_blocking(move || {
            let _permit = permit;

            work(&hasher)
        })
        .await
        .map_err(AuthServiceError::Worker)
    }
}
