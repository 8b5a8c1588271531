//! Token header, payload and their wire encoding.

use serde::{Deserialize, Serialize};

use crate::{
    codec::{encode, hmac_sha512},
    secrets::SecretValue,
    token::TokenError,
};

/// The only signing algorithm accepted.
pub const ALGORITHM: &str = "HS512";

/// The only token type accepted.
pub const TOKEN_TYPE: &str = "JWT";

/// Token header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Signing algorithm, always `HS512` for tokens this crate issues.
    #[serde(rename = "alg")]
    pub algorithm: String,

    /// Missing `typ` decodes as empty and is rejected after the algorithm check.
    #[serde(rename = "typ", default)]
    pub token_type: String,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            algorithm: ALGORITHM.to_string(),
            token_type: TOKEN_TYPE.to_string(),
        }
    }
}

/// Token claims.
///
/// Field order fixes the JSON key order, which keeps the encoding canonical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Issuing service identity.
    #[serde(rename = "iss")]
    pub issuer: String,

    /// Intended recipient identity.
    #[serde(rename = "aud")]
    pub audience: String,

    /// Opaque principal identifier.
    #[serde(rename = "sub")]
    pub subject: String,

    /// Unique per issuance.
    #[serde(rename = "jti")]
    pub token_id: String,

    /// Identifies the rotating secret behind the signature.
    #[serde(rename = "kid")]
    pub key_id: String,

    /// Unix seconds at issuance.
    #[serde(rename = "iat")]
    pub issued_at: i64,

    /// Unix seconds before which the token is not active.
    #[serde(rename = "nbf")]
    pub not_before: i64,

    /// Unix seconds from which the token is expired.
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

/// Claims supplied by the issuer when minting a token.
#[derive(Debug, Clone)]
#[expect(missing_docs, reason = "fields mirror Payload")]
pub struct NewToken<'a> {
    pub issuer: &'a str,
    pub audience: &'a str,
    pub subject: &'a str,
    pub token_id: &'a str,
    pub key_id: &'a str,
}

/// An in-memory token, never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Header.
    pub header: Header,

    /// Claims.
    pub payload: Payload,
}

impl Token {
    /// Build a token issued at `now` that expires `lifespan` seconds later.
    ///
    /// A negative lifespan is clamped to zero, producing a token that is
    /// already expired.
    #[must_use]
    pub fn new(claims: &NewToken<'_>, now: i64, lifespan: i64) -> Self {
        let lifespan = lifespan.max(0);

        Self {
            header: Header::default(),
            payload: Payload {
                issuer: claims.issuer.to_string(),
                audience: claims.audience.to_string(),
                subject: claims.subject.to_string(),
                token_id: claims.token_id.to_string(),
                key_id: claims.key_id.to_string(),
                issued_at: now,
                not_before: now,
                expires_at: now.saturating_add(lifespan),
            },
        }
    }

    /// `base64url(header) "." base64url(payload)`, the bytes the signature covers.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Encoding`] if JSON serialisation fails.
    pub fn signing_input(&self) -> Result<String, TokenError> {
        let header = serde_json::to_vec(&self.header).map_err(TokenError::Encoding)?;
        let payload = serde_json::to_vec(&self.payload).map_err(TokenError::Encoding)?;

        Ok(format!("{}.{}", encode(&header), encode(&payload)))
    }

    /// Serialise and sign the token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::NoSigningKey`] for an empty secret, or
    /// [`TokenError::Encoding`] if serialisation fails.
    pub fn sign(&self, secret: &SecretValue) -> Result<String, TokenError> {
        let signing_input = self.signing_input()?;

        let signature = sign(&signing_input, secret)?;

        Ok(format!("{signing_input}.{signature}"))
    }
}

/// Base64url `HMAC-SHA512(signing_input, secret)`.
///
/// # Errors
///
/// Returns [`TokenError::NoSigningKey`] for an empty secret.
pub fn sign(signing_input: &str, secret: &SecretValue) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::no_signing_key());
    }

    Ok(encode(&hmac_sha512(
        signing_input.as_bytes(),
        secret.as_bytes(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims() -> NewToken<'static> {
        NewToken {
            issuer: "svc.example",
            audience: "svc.example",
            subject: "user-42",
            token_id: "jti",
            key_id: "kid",
        }
    }

    #[test]
    fn new_sets_time_claims() {
        let token = Token::new(&claims(), 1_700_000_000, 3_600);

        assert_eq!(token.payload.issued_at, 1_700_000_000);
        assert_eq!(token.payload.not_before, 1_700_000_000);
        assert_eq!(token.payload.expires_at, 1_700_003_600);
        assert_eq!(token.header, Header::default());
    }

    #[test]
    fn negative_lifespan_is_clamped() {
        let token = Token::new(&claims(), 1_700_000_000, -10);

        assert_eq!(token.payload.expires_at, token.payload.issued_at);
    }

    #[test]
    fn payload_json_uses_registered_claim_names_in_order() {
        let token = Token::new(&claims(), 1_700_000_000, 3_600);

        let json = serde_json::to_string(&token.payload).expect("payload serialises");

        assert_eq!(
            json,
            r#"{"iss":"svc.example","aud":"svc.example","sub":"user-42","jti":"jti","kid":"kid","iat":1700000000,"nbf":1700000000,"exp":1700003600}"#
        );
    }

    #[test]
    fn header_encodes_to_the_well_known_segment() {
        let token = Token::new(&claims(), 1_700_000_000, 3_600);

        let signing_input = token.signing_input().expect("token encodes");

        assert!(signing_input.starts_with("eyJhbGciOiJIUzUxMiIsInR5cCI6IkpXVCJ9."));
    }

    #[test]
    fn signing_is_deterministic_and_keyed() {
        let token = Token::new(&claims(), 1_700_000_000, 3_600);

        let first = token.sign(&SecretValue::new("one")).expect("signs");
        let again = token.sign(&SecretValue::new("one")).expect("signs");
        let other = token.sign(&SecretValue::new("two")).expect("signs");

        assert_eq!(first, again);
        assert_ne!(first, other);
        assert_eq!(first.split('.').count(), 3);
    }

    #[test]
    fn empty_secret_is_refused() {
        let token = Token::new(&claims(), 1_700_000_000, 3_600);

        let result = token.sign(&SecretValue::new(""));

        assert!(
            matches!(result, Err(TokenError::NoSigningKey { .. })),
            "expected NoSigningKey, got {result:?}"
        );
    }
}
