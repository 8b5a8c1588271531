//! Parsing and checking tokens received from outside.

use serde::de::DeserializeOwned;

use crate::{
    codec::{constant_time_eq, decode, hmac_sha512, is_base64url},
    secrets::SecretValue,
    token::{
        TokenError,
        claims::{ALGORITHM, Header, Payload, TOKEN_TYPE},
    },
};

/// A structurally valid token whose signature has not been checked yet.
///
/// Nothing in `payload` may be trusted until [`UntrustedToken::verify_signature`]
/// succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntrustedToken<'a> {
    signing_input: &'a str,
    signature: &'a str,
    header: Header,
    payload: Payload,
}

impl<'a> UntrustedToken<'a> {
    /// Split, decode and structurally validate a raw token.
    ///
    /// The algorithm is checked before the payload is even decoded, and no
    /// keyed hash is computed here.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::MalformedToken`] unless the token is three
    /// non-empty base64url segments carrying JSON header and payload, or
    /// [`TokenError::UnsupportedAlgorithm`] unless the header names HS512.
    pub fn parse(raw: &'a str) -> Result<Self, TokenError> {
        let (signing_input, signature) = raw.rsplit_once('.').ok_or(TokenError::MalformedToken)?;
        let (header, payload) = signing_input
            .split_once('.')
            .ok_or(TokenError::MalformedToken)?;

        // An empty signature is refused only after the header, so `alg: none`
        // tokens always surface as an algorithm failure.
        let structural = [header, payload]
            .iter()
            .all(|segment| !segment.is_empty() && is_base64url(segment));

        if !structural || !is_base64url(signature) {
            return Err(TokenError::MalformedToken);
        }

        let header: Header = decode_json(header)?;

        if header.algorithm != ALGORITHM {
            return Err(TokenError::UnsupportedAlgorithm);
        }

        if header.token_type != TOKEN_TYPE {
            return Err(TokenError::MalformedToken);
        }

        let payload: Payload = decode_json(payload)?;

        if signature.is_empty() {
            return Err(TokenError::MalformedToken);
        }

        Ok(Self {
            signing_input,
            signature,
            header,
            payload,
        })
    }

    /// Decoded header.
    #[must_use]
    pub const fn header(&self) -> &Header {
        &self.header
    }

    /// Unverified claims.
    #[must_use]
    pub const fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Recompute the signature over the received segments and compare in
    /// constant time.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::NoSigningKey`] for an empty secret and
    /// [`TokenError::InvalidSignature`] when the signature does not decode or
    /// does not match.
    pub fn verify_signature(&self, secret: &SecretValue) -> Result<(), TokenError> {
        if secret.is_empty() {
            return Err(TokenError::no_signing_key());
        }

        let received = decode(self.signature).map_err(|_err| TokenError::InvalidSignature)?;
        let expected = hmac_sha512(self.signing_input.as_bytes(), secret.as_bytes());

        if constant_time_eq(&received, &expected) {
            Ok(())
        } else {
            Err(TokenError::InvalidSignature)
        }
    }

    /// Consume the token, returning its claims.
    #[must_use]
    pub fn into_payload(self) -> Payload {
        self.payload
    }
}

fn decode_json<T: DeserializeOwned>(segment: &str) -> Result<T, TokenError> {
    let bytes = decode(segment).map_err(|_err| TokenError::MalformedToken)?;

    serde_json::from_slice(&bytes).map_err(|_err| TokenError::MalformedToken)
}

/// Check a payload's timestamps against `now`.
///
/// A timestamp that could never have come from a correctly behaving issuer
/// yields [`TokenError::InvalidToken`]; one that was once valid but has aged
/// out yields [`TokenError::Expired`]. The former wins when both apply. A
/// token is expired from its `exp` second onwards.
///
/// # Errors
///
/// Returns [`TokenError::InvalidToken`] or [`TokenError::Expired`] as above.
pub fn check_time_window(
    payload: &Payload,
    now: i64,
    valid_from: i64,
    lifespan: i64,
) -> Result<(), TokenError> {
    let lifespan = lifespan.max(0);
    let latest = payload.issued_at.saturating_add(lifespan);
    let plausible = valid_from..=latest;

    if !(valid_from..=now).contains(&payload.issued_at) {
        return Err(TokenError::InvalidToken);
    }

    if !plausible.contains(&payload.not_before) || payload.not_before > now {
        return Err(TokenError::InvalidToken);
    }

    if !plausible.contains(&payload.expires_at) {
        return Err(TokenError::InvalidToken);
    }

    let stale = payload.issued_at < now.saturating_sub(lifespan);

    if stale || payload.expires_at <= now {
        return Err(TokenError::Expired);
    }

    Ok(())
}
