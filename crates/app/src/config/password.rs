//! Password Config

use clap::Args;
use warden::{config::PasswordConfig, password::CostPolicy};

/// Default bound on concurrent password derivations.
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Password hashing settings.
#[derive(Debug, Clone, Args)]
pub struct PasswordArgs {
    /// Cost level for new hashes; 0 uses the policy default
    #[arg(long, env = "PASSWORD_COST", default_value_t = 0)]
    pub password_cost: u32,

    /// Maximum concurrent password derivations
    #[arg(long, env = "PASSWORD_MAX_CONCURRENCY", default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub password_max_concurrency: usize,
}

impl Default for PasswordArgs {
    fn default() -> Self {
        Self {
            password_cost: 0,
            password_max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

impl From<&PasswordArgs> for PasswordConfig {
    fn from(args: &PasswordArgs) -> Self {
        PasswordConfig {
            cost_level: args.password_cost,
            policy: CostPolicy::default(),
        }
    }
}
