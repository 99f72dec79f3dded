//! Core domain entities.
//!
//! - [`UrlRecord`] - A long URL and the slug that stands in for it
//! - [`CachedUrl`] - The reduced `{originalUrl, identifier}` projection held by the cache
//! - [`NewUrlRecord`] - Input for inserting a record into the durable store

pub mod url_record;

pub use url_record::{CachedUrl, NewUrlRecord, UrlRecord};
