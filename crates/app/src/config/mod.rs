//! Application configuration, read from flags or the environment.

pub mod db;
pub mod logging;
pub mod password;
pub mod token;

pub use db::DatabaseConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use password::PasswordArgs;
pub use token::TokenArgs;
