//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON and validator for input checks.

pub mod health;
pub mod shorten;
