use clap::{Args, Subcommand};
use warden_app::{
    config::{DatabaseConfig, PasswordArgs, TokenArgs},
    context::AppContext,
};

mod issue;
mod verify;

#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    Issue(issue::IssueTokenArgs),
    Verify(verify::VerifyTokenArgs),
}

pub(crate) async fn run(command: TokenCommand) -> Result<(), String> {
    match command.command {
        TokenSubcommand::Issue(args) => issue::run(args).await,
        TokenSubcommand::Verify(args) => verify::run(args).await,
    }
}

async fn context(database: &DatabaseConfig, tokens: &TokenArgs) -> Result<AppContext, String> {
    AppContext::from_config(database, tokens, &PasswordArgs::default())
        .await
        .map_err(|error| format!("failed to initialise: {error}"))
}

fn timestamp(seconds: i64) -> String {
    jiff::Timestamp::from_second(seconds)
        .map_or_else(|_err| seconds.to_string(), |timestamp| timestamp.to_string())
}
