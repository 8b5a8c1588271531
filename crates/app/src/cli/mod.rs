use clap::{Parser, Subcommand};
use warden_app::config::LoggingConfig;

mod db;
mod password;
mod token;

#[derive(Debug, Parser)]
#[command(name = "warden-app", about = "Warden CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Token(token::TokenCommand),
    Password(password::PasswordCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Token(command) => token::run(command).await,
            Commands::Password(command) => password::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}
