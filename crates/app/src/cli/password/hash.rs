use clap::Args;
use warden_app::{auth::PasswordWorkers, config::PasswordArgs};

use super::workers;

#[derive(Debug, Args)]
pub(crate) struct HashPasswordArgs {
    #[command(flatten)]
    password_args: PasswordArgs,

    /// Password to hash
    #[arg(long, env = "WARDEN_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn run(args: HashPasswordArgs) -> Result<(), String> {
    let workers = workers(&args.password_args);

    println!(
        "{}",
        hash(&workers, &args.password, args.password_args.password_cost).await?
    );

    Ok(())
}

async fn hash(workers: &PasswordWorkers, password: &str, cost: u32) -> Result<String, String> {
    let hash = workers
        .derive(password, cost)
        .await
        .map_err(|error| format!("failed to hash password: {error}"))?;

    Ok(format!("hash: {hash}"))
}
