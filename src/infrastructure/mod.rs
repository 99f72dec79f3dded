//! Infrastructure layer for external integrations.
//!
//! Implements the storage contracts defined by the domain layer.
//!
//! # Modules
//!
//! - [`cache`] - Cache backends (Redis and in-memory) and the owner-scoped URL cache
//! - [`persistence`] - Durable URL stores (PostgreSQL and in-memory)

pub mod cache;
pub mod persistence;
