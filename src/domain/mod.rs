//! Domain layer containing the URL record model and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - URL records, their cached projection, and creation input
//! - [`repositories`] - Durable store trait implemented by the infrastructure layer
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Orchestration lives in [`crate::application::services`].

pub mod entities;
pub mod repositories;
