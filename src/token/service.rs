//! Issuing and verifying tokens.

use std::sync::Arc;

use tracing::debug;

use crate::{
    clock::Clock,
    codec::random_text,
    config::{TokenConfig, Validation},
    random::RandomSource,
    secrets::SecretRotation,
    token::{
        TokenError,
        claims::{NewToken, Token},
        errors::report,
        untrusted::{UntrustedToken, check_time_window},
    },
};

/// Random bytes behind each token id.
pub const TOKEN_ID_BYTES: usize = 48;

/// A freshly signed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Wire form.
    pub token: String,

    /// Unique id, for callers that track sessions.
    pub token_id: String,

    /// Signing secret used.
    pub key_id: String,

    /// Unix second from which the token is expired.
    pub expires_at: i64,
}

/// Identity carried by a token that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    /// Principal the token was issued for.
    pub subject: String,

    /// Id returned when the token was issued.
    pub token_id: String,

    /// Unix second from which the token is expired.
    pub expires_at: i64,
}

/// Issues and verifies HS512 tokens signed with rotating secrets.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    config: TokenConfig,
    secrets: SecretRotation,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
}

impl TokenCodec {
    /// Create a codec.
    #[must_use]
    pub fn new(
        config: TokenConfig,
        secrets: SecretRotation,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            config,
            secrets,
            clock,
            random,
        }
    }

    /// Settings this codec issues and verifies with.
    #[must_use]
    pub const fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Issue a token for `subject`, signed with the current secret.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidSubject`] for an empty subject and
    /// [`TokenError::NoSigningKey`] when no secret can be obtained.
    pub async fn issue_token(&self, subject: &str) -> Result<IssuedToken, TokenError> {
        self.issue(subject)
            .await
            .inspect_err(|rejection| report("issue", rejection))
    }

    /// Verify `token` against this codec's own configuration.
    ///
    /// # Errors
    ///
    /// Returns the first failed check; see [`TokenCodec::verify_token_with`].
    pub async fn verify_token(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        let validation = self.config.validation();

        self.verify_token_with(token, &validation).await
    }

    /// Verify `token` against an explicit expectation.
    ///
    /// Checks run cheapest first: structure, algorithm, time window, then the
    /// keyed hash, and finally audience and issuer.
    ///
    /// # Errors
    ///
    /// Returns the [`TokenError`] of the first failed check.
    pub async fn verify_token_with(
        &self,
        token: &str,
        validation: &Validation,
    ) -> Result<VerifiedToken, TokenError> {
        self.verify(token, validation)
            .await
            .inspect_err(|rejection| report("verify", rejection))
    }

    async fn issue(&self, subject: &str) -> Result<IssuedToken, TokenError> {
        if subject.is_empty() {
            return Err(TokenError::InvalidSubject);
        }

        let now = self.clock.now();

        let key_id = self
            .secrets
            .current_key_id(&self.config.key_name, now, self.config.key_validity)
            .await?;

        let token_id = random_text(self.random.as_ref(), TOKEN_ID_BYTES);

        let token = Token::new(
            &NewToken {
                issuer: &self.config.issuer,
                audience: &self.config.audience,
                subject,
                token_id: &token_id,
                key_id: &key_id,
            },
            now,
            self.config.lifespan,
        );

        let secret = self
            .secrets
            .resolve(&self.config.key_name, &key_id)
            .await?
            .ok_or_else(TokenError::no_signing_key)?;

        let signed = token.sign(&secret)?;

        debug!(%key_id, expires_at = token.payload.expires_at, "issued token");

        Ok(IssuedToken {
            token: signed,
            token_id,
            key_id,
            expires_at: token.payload.expires_at,
        })
    }

    async fn verify(
        &self,
        token: &str,
        validation: &Validation,
    ) -> Result<VerifiedToken, TokenError> {
        let untrusted = UntrustedToken::parse(token)?;

        check_time_window(
            untrusted.payload(),
            self.clock.now(),
            validation.valid_from,
            validation.lifespan,
        )?;

        let secret = self
            .secrets
            .resolve(&self.config.key_name, &untrusted.payload().key_id)
            .await?
            .ok_or_else(TokenError::no_signing_key)?;

        untrusted.verify_signature(&secret)?;

        let payload = untrusted.into_payload();

        if payload.audience != validation.audience {
            return Err(TokenError::WrongAudience);
        }

        if payload.issuer != validation.issuer {
            return Err(TokenError::WrongIssuer);
        }

        Ok(VerifiedToken {
            subject: payload.subject,
            token_id: payload.token_id,
            expires_at: payload.expires_at,
        })
    }
}
