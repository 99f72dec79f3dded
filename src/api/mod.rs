//! REST API layer for HTTP request/response handling.
//!
//! Translates HTTP requests into [`crate::application::services::UrlService`]
//! calls and formats responses.
//!
//! # Modules
//!
//! - [`dto`] - Request/response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`routes`] - API route configuration

pub mod dto;
pub mod handlers;
pub mod routes;
