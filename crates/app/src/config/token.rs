//! Token Config

use clap::Args;
use warden::config::{DEFAULT_KEY_VALIDITY, DEFAULT_LIFESPAN, TokenConfig};

/// Token issuance and verification settings.
#[derive(Debug, Clone, Args)]
pub struct TokenArgs {
    /// Issuer written to and required in every token
    #[arg(long, env = "TOKEN_ISSUER")]
    pub issuer: String,

    /// Audience written to and required in every token
    #[arg(long, env = "TOKEN_AUDIENCE")]
    pub audience: String,

    /// Token lifespan in seconds
    #[arg(long, env = "TOKEN_LIFESPAN", default_value_t = DEFAULT_LIFESPAN)]
    pub lifespan: i64,

    /// Seconds a signing secret stays current before rotation
    #[arg(long, env = "TOKEN_KEY_VALIDITY", default_value_t = DEFAULT_KEY_VALIDITY)]
    pub key_validity: i64,
}

impl From<&TokenArgs> for TokenConfig {
    fn from(args: &TokenArgs) -> Self {
        TokenConfig::new(&args.issuer, &args.audience)
            .with_lifespan(args.lifespan)
            .with_key_validity(args.key_validity)
    }
}
