//! Application layer services implementing the shortener's business logic.
//!
//! Services consume repository and cache traits and expose the operations
//! used by HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::slug_generator::SlugGenerator`] - Collision-checked identifier minting
//! - [`services::url_service::UrlService`] - Record creation and cache-first lookup

pub mod services;
