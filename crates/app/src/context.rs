//! App Context

use std::sync::Arc;

use sqlx::PgPool;
use thiserror::Error;
use warden::config::{PasswordConfig, TokenConfig};

use crate::{
    auth::{AuthService, PgAuthService},
    config::{DatabaseConfig, PasswordArgs, TokenArgs},
    database,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub pool: PgPool,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_config(
        database: &DatabaseConfig,
        tokens: &TokenArgs,
        passwords: &PasswordArgs,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(&database.database_url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_pool(pool, tokens, passwords))
    }

    /// Build application context around an existing pool.
    #[must_use]
    pub fn from_pool(pool: PgPool, tokens: &TokenArgs, passwords: &PasswordArgs) -> Self {
        let auth = PgAuthService::new(
            pool.clone(),
            TokenConfig::from(tokens),
            &PasswordConfig::from(passwords),
            passwords.password_max_concurrency,
        );

        Self {
            pool,
            auth: Arc::new(auth),
        }
    }
}
