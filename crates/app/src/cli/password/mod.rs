use std::sync::Arc;

use clap::{Args, Subcommand};
use warden::{config::PasswordConfig, password::PasswordHasher, random::OsRandom};
use warden_app::{auth::PasswordWorkers, config::PasswordArgs};

mod hash;
mod verify;

#[derive(Debug, Args)]
pub(crate) struct PasswordCommand {
    #[command(subcommand)]
    command: PasswordSubcommand,
}

#[derive(Debug, Subcommand)]
enum PasswordSubcommand {
    Hash(hash::HashPasswordArgs),
    Verify(verify::VerifyPasswordArgs),
}

pub(crate) async fn run(command: PasswordCommand) -> Result<(), String> {
    match command.command {
        PasswordSubcommand::Hash(args) => hash::run(args).await,
        PasswordSubcommand::Verify(args) => verify::run(args).await,
    }
}

fn workers(args: &PasswordArgs) -> PasswordWorkers {
    let config = PasswordConfig::from(args);

    PasswordWorkers::new(
        PasswordHasher::new(config.policy, Arc::new(OsRandom)),
        args.password_max_concurrency,
    )
}
