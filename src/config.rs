//! Configuration for the token codec and password hasher.

use serde::Deserialize;

use crate::password::CostPolicy;

/// Earliest issuance time any token may claim: 2021-01-01T00:00:00Z.
pub const DEFAULT_VALID_FROM: i64 = 1_609_459_200;

/// Default token lifespan in seconds.
pub const DEFAULT_LIFESPAN: i64 = 900;

/// Default logical name of the token signing key.
pub const DEFAULT_KEY_NAME: &str = "token-signing";

/// Default number of seconds a signing secret stays current.
pub const DEFAULT_KEY_VALIDITY: i64 = 86_400;

/// Token issuance and verification settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenConfig {
    /// Value written to and expected in `iss`.
    pub issuer: String,

    /// Value written to and expected in `aud`.
    pub audience: String,

    /// Seconds between issuance and expiry.
    #[serde(default = "default_lifespan")]
    pub lifespan: i64,

    /// Tokens claiming to be issued before this Unix second are invalid.
    #[serde(default = "default_valid_from")]
    pub valid_from: i64,

    /// Logical name of the rotating signing secret.
    #[serde(default = "default_key_name")]
    pub key_name: String,

    /// Seconds a signing secret remains current before a new one is minted.
    #[serde(default = "default_key_validity")]
    pub key_validity: i64,
}

impl TokenConfig {
    /// Settings with defaults for everything but issuer and audience.
    #[must_use]
    pub fn new(issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            lifespan: DEFAULT_LIFESPAN,
            valid_from: DEFAULT_VALID_FROM,
            key_name: DEFAULT_KEY_NAME.to_string(),
            key_validity: DEFAULT_KEY_VALIDITY,
        }
    }

    /// Set the token lifespan.
    #[must_use]
    pub fn with_lifespan(mut self, lifespan: i64) -> Self {
        self.lifespan = lifespan;
        self
    }

    /// Set the signing key name.
    #[must_use]
    pub fn with_key_name(mut self, key_name: impl Into<String>) -> Self {
        self.key_name = key_name.into();
        self
    }

    /// Set how long a signing secret stays current.
    #[must_use]
    pub fn with_key_validity(mut self, key_validity: i64) -> Self {
        self.key_validity = key_validity;
        self
    }

    /// The expectation tokens issued under this configuration must meet.
    #[must_use]
    pub fn validation(&self) -> Validation {
        Validation {
            issuer: self.issuer.clone(),
            audience: self.audience.clone(),
            valid_from: self.valid_from,
            lifespan: self.lifespan,
        }
    }
}

/// What a verifier expects of a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// Required `iss`.
    pub issuer: String,

    /// Required `aud`.
    pub audience: String,

    /// Earliest acceptable issuance time.
    pub valid_from: i64,

    /// Maximum token age in seconds.
    pub lifespan: i64,
}

/// Password hashing settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PasswordConfig {
    /// Cost level for new hashes; 0 picks the policy default.
    #[serde(default)]
    pub cost_level: u32,

    /// Mapping from cost level to Argon2id parameters.
    #[serde(default)]
    pub policy: CostPolicy,
}

const fn default_lifespan() -> i64 {
    DEFAULT_LIFESPAN
}

const fn default_valid_from() -> i64 {
    DEFAULT_VALID_FROM
}

fn default_key_name() -> String {
    DEFAULT_KEY_NAME.to_string()
}

const fn default_key_validity() -> i64 {
    DEFAULT_KEY_VALIDITY
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn deserialises_with_defaults() -> TestResult {
        let config: TokenConfig =
            serde_json::from_str(r#"{"issuer":"svc.example","audience":"api.example"}"#)?;

        assert_eq!(config, TokenConfig::new("svc.example", "api.example"));
        assert_eq!(config.lifespan, 900);
        assert_eq!(config.valid_from, 1_609_459_200);
        assert_eq!(config.key_name, "token-signing");

        Ok(())
    }

    #[test]
    fn validation_mirrors_config() {
        let validation = TokenConfig::new("iss", "aud").with_lifespan(60).validation();

        assert_eq!(
            validation,
            Validation {
                issuer: "iss".to_string(),
                audience: "aud".to_string(),
                valid_from: DEFAULT_VALID_FROM,
                lifespan: 60,
            }
        );
    }

    #[test]
    fn password_config_defaults_to_policy_default() -> TestResult {
        let config: PasswordConfig = serde_json::from_str("{}")?;

        assert_eq!(config.cost_level, 0);
        assert_eq!(config.policy, CostPolicy::default());

        Ok(())
    }
}
