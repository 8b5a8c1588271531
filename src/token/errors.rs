//! Token errors.

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::secrets::SecretStoreError;

/// Why a token could not be issued or was rejected.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The subject to issue a token for was empty.
    #[error("token subject must not be empty")]
    InvalidSubject,

    /// The token is not three base64url segments carrying a JSON header and payload.
    #[error("token is malformed")]
    MalformedToken,

    /// The header names an algorithm other than HS512.
    #[error("token uses an unsupported algorithm")]
    UnsupportedAlgorithm,

    /// A timestamp lies outside any range a correct issuer could produce.
    #[error("token could not have been issued by this service")]
    InvalidToken,

    /// The token was valid once but no longer is.
    #[error("token has expired")]
    Expired,

    /// No usable signing secret could be obtained.
    #[error("no signing key available")]
    NoSigningKey {
        /// Store failure, if the key was missing because of one.
        #[source]
        source: Option<SecretStoreError>,
    },

    /// The signature does not match the token contents.
    #[error("token signature is invalid")]
    InvalidSignature,

    /// The audience claim does not match the expected audience.
    #[error("token was issued for a different audience")]
    WrongAudience,

    /// The issuer claim does not match the expected issuer.
    #[error("token was issued by a different issuer")]
    WrongIssuer,

    /// Header or payload serialisation failed.
    #[error("failed to encode token")]
    Encoding(#[source] serde_json::Error),
}

/// Broad category of a [`TokenError`], used to pick how loudly to report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenErrorClass {
    /// The caller passed bad input; not security relevant.
    Input,

    /// Structurally invalid or hostile token.
    Hostile,

    /// Forged or misdirected token.
    Integrity,

    /// Token outside its time window.
    Temporal,

    /// Secret store unavailable or encoder failure.
    Infrastructure,
}

impl TokenError {
    /// Category of this error.
    #[must_use]
    pub const fn class(&self) -> TokenErrorClass {
        match self {
            Self::InvalidSubject => TokenErrorClass::Input,
            Self::MalformedToken | Self::UnsupportedAlgorithm => TokenErrorClass::Hostile,
            Self::InvalidSignature | Self::WrongAudience | Self::WrongIssuer => {
                TokenErrorClass::Integrity
            }
            Self::InvalidToken | Self::Expired => TokenErrorClass::Temporal,
            Self::NoSigningKey { .. } | Self::Encoding(_) => TokenErrorClass::Infrastructure,
        }
    }

    pub(crate) const fn no_signing_key() -> Self {
        Self::NoSigningKey { source: None }
    }
}

impl From<SecretStoreError> for TokenError {
    fn from(source: SecretStoreError) -> Self {
        Self::NoSigningKey {
            source: Some(source),
        }
    }
}

/// Log a rejected issuance or verification at the level its class calls for.
///
/// Input errors are the caller's concern and are not logged.
pub(crate) fn report(operation: &'static str, rejection: &TokenError) {
    match rejection.class() {
        TokenErrorClass::Input => {}
        TokenErrorClass::Hostile => debug!(operation, %rejection, "token rejected"),
        TokenErrorClass::Integrity => warn!(operation, %rejection, "token failed integrity check"),
        TokenErrorClass::Temporal => info!(operation, %rejection, "token outside validity window"),
        TokenErrorClass::Infrastructure => error!(operation, error = ?rejection, "token operation failed"),
    }
}
