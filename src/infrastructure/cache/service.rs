//! Cache backend trait and error types.

use async_trait::async_trait;
use std::fmt;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
    /// The backend did not answer within the configured timeout.
    Timeout(String),
    /// A stored payload could not be deserialized.
    Decode(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
            Self::Timeout(op) => write!(f, "Cache {} timed out", op),
            Self::Decode(e) => write!(f, "Cache payload decode error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Raw key-value cache backend.
///
/// Entries never expire. Absence of a key is `Ok(None)`, never an error;
/// backend failures are returned to the caller rather than logged away.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process cache
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the raw value stored under `key`.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores several entries with no expiry.
    ///
    /// Backends that support it apply all writes atomically.
    async fn set_many(&self, entries: &[(String, String)]) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short backend name for logs and health output.
    fn backend_name(&self) -> &'static str;
}
