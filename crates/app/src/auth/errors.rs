//! Auth service errors.

use thiserror::Error;
use tokio::{sync::AcquireError, task::JoinError};
use warden::{password::PasswordError, token::TokenError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("token rejected")]
    Token(#[source] TokenError),

    #[error("password hashing failed")]
    Password(#[source] PasswordError),

    #[error("password worker failed")]
    Worker(#[source] JoinError),

    #[error("password workers unavailable")]
    Unavailable(#[source] AcquireError),
}

impl From<TokenError> for AuthServiceError {
    fn from(error: TokenError) -> Self {
        Self::Token(error)
    }
}

impl From<PasswordError> for AuthServiceError {
    fn from(error: PasswordError) -> Self {
        Self::Password(error)
    }
}
