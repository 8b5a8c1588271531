//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use warden::{
    clock::SystemClock,
    config::{PasswordConfig, TokenConfig},
    password::PasswordHasher,
    random::OsRandom,
    secrets::SecretRotation,
    token::{IssuedToken, TokenCodec, VerifiedToken},
};

use crate::{
    auth::{AuthServiceError, PasswordWorkers},
    secrets::PgSecretRepository,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    tokens: TokenCodec,
    passwords: PasswordWorkers,
}

impl PgAuthService {
    /// Build a service whose signing secrets live in `pool`.
    #[must_use]
    pub fn new(
        pool: PgPool,
        tokens: TokenConfig,
        passwords: &PasswordConfig,
        max_concurrency: usize,
    ) -> Self {
        let random = Arc::new(OsRandom);
        let secrets = SecretRotation::new(Arc::new(PgSecretRepository::new(pool)), random.clone());

        Self::from_parts(
            TokenCodec::new(tokens, secrets, Arc::new(SystemClock), random.clone()),
            PasswordWorkers::new(PasswordHasher::new(passwords.policy, random), max_concurrency),
        )
    }

    /// Build a service from already wired parts.
    #[must_use]
    pub fn from_parts(tokens: TokenCodec, passwords: PasswordWorkers) -> Self {
        Self { tokens, passwords }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn issue_token(&self, subject: &str) -> Result<IssuedToken, AuthServiceError> {
        self.tokens
            .issue_token(subject)
            .await
            .map_err(AuthServiceError::from)
    }

    async fn verify_token(&self, token: &str) -> Result<VerifiedToken, AuthServiceError> {
        self.tokens
            .verify_token(token)
            .await
            .map_err(AuthServiceError::from)
    }

    async fn hash_password(
        &self,
        password: &str,
        cost_level: u32,
    ) -> Result<String, AuthServiceError> {
        self.passwords.derive(password, cost_level).await
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthServiceError> {
        self.passwords.confirm(password, hash).await
    }
}

/// What the route layer needs for login and request authentication.
#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Issue a token for `subject`.
    async fn issue_token(&self, subject: &str) -> Result<IssuedToken, AuthServiceError>;

    /// Verify a presented token.
    async fn verify_token(&self, token: &str) -> Result<VerifiedToken, AuthServiceError>;

    /// Hash a new password.
    async fn hash_password(
        &self,
        password: &str,
        cost_level: u32,
    ) -> Result<String, AuthServiceError>;

    /// Check a password against a stored hash.
    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthServiceError>;
}
