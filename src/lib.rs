//! Warden
//!
//! Warden issues and verifies HS512 tokens signed with rotating secrets, and
//! hashes passwords with Argon2id.

pub mod clock;
pub mod codec;
pub mod config;
pub mod password;
pub mod prelude;
pub mod random;
pub mod secrets;
pub mod token;
