//! Persistence, services and configuration for running Warden against `PostgreSQL`.

pub mod auth;
pub mod config;
pub mod context;
pub mod database;
pub mod logging;
pub mod secrets;

#[cfg(test)]
mod test;
