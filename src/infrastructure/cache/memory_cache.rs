//! In-process cache used when Redis is not configured, and in tests.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Thread-safe in-memory cache backed by a `DashMap`.
///
/// Entries live for the lifetime of the process. Clones share storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryCache {
    inner: Arc<DashMap<String, String>>,
}

impl MemoryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        debug!("Using MemoryCache");
        Self::default()
    }

    /// Number of entries currently cached.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Stores a raw value directly, bypassing the record encoding.
    pub fn seed(&self, key: &str, value: &str) {
        self.inner.insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.inner.get(key).map(|v| v.clone()))
    }

    async fn set_many(&self, entries: &[(String, String)]) -> CacheResult<()> {
        for (key, value) in entries {
            self.inner.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
