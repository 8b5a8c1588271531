//! Secret rotation store

mod errors;
mod models;
mod repository;
mod rotation;

pub use errors::*;
pub use models::*;
pub use repository::*;
pub use rotation::*;
