//! Signing secret persistence

mod repository;

pub use repository::PgSecretRepository;
