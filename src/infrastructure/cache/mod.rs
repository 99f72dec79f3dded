//! Caching layer for URL records.
//!
//! Provides a [`CacheService`] backend trait with two implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`MemoryCache`] - In-process cache for development and tests
//!
//! [`UrlCache`] sits on top of a backend and implements the owner-scoped,
//! dual-key record cache used by the mapping service.

mod memory_cache;
mod redis_cache;
mod service;
mod url_cache;

pub use memory_cache::MemoryCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};
pub use url_cache::UrlCache;
