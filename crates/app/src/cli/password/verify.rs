use clap::Args;
use warden_app::{auth::PasswordWorkers, config::PasswordArgs};

use super::workers;

#[derive(Debug, Args)]
pub(crate) struct VerifyPasswordArgs {
    #[command(flatten)]
    password_args: PasswordArgs,

    /// Candidate password
    #[arg(long, env = "WARDEN_PASSWORD", hide_env_values = true)]
    password: String,

    /// Stored hash to check against
    #[arg(long)]
    hash: String,
}

pub(crate) async fn run(args: VerifyPasswordArgs) -> Result<(), String> {
    let workers = workers(&args.password_args);

    if verify(&workers, &args.password, &args.hash).await? {
        println!("password: match");

        Ok(())
    } else {
        Err("password: mismatch".to_string())
    }
}

async fn verify(workers: &PasswordWorkers, password: &str, hash: &str) -> Result<bool, String> {
    workers
        .confirm(password, hash)
        .await
        .map_err(|error| format!("failed to verify password: {error}"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use warden::{
        password::{CostPolicy, PasswordHasher},
        random::OsRandom,
    };

    use super::*;

    fn cheap() -> PasswordWorkers {
        PasswordWorkers::new(
            PasswordHasher::new(
                CostPolicy {
                    memory_per_level_kib: 64,
                    ..CostPolicy::default()
                },
                Arc::new(OsRandom),
            ),
            1,
        )
    }

    #[tokio::test]
    async fn matches_only_the_original_password() {
        let workers = cheap();
        let hash = workers.derive("hunter2", 1).await.expect("password hashed");

        assert!(verify(&workers, "hunter2", &hash).await.expect("verified"));
        assert!(!verify(&workers, "hunter3", &hash).await.expect("verified"));
        assert!(!verify(&workers, "hunter2", "garbage").await.expect("verified"));
    }
}
