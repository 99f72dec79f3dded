//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for durable storage; implementations live in
//! `crate::infrastructure::persistence`. Mocks are generated via `mockall`
//! for unit tests.

pub mod url_repository;

pub use url_repository::UrlRepository;

#[cfg(test)]
pub use url_repository::MockUrlRepository;
