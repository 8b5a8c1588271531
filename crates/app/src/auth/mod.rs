//! Authentication

mod errors;
mod passwords;
mod service;

pub use errors::*;
pub use passwords::PasswordWorkers;
pub use service::*;
