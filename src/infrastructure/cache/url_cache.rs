//! Owner-scoped cache tier for URL records.

use super::service::{CacheError, CacheResult, CacheService};
use crate::domain::entities::{CachedUrl, UrlRecord};
use std::sync::Arc;
use tracing::debug;

/// Read-through/write-through layer over a [`CacheService`] backend.
///
/// Every key is suffixed with `-{owner}` so entries are partitioned per
/// caller. A record is addressable both by its identifier and by its
/// original URL.
#[derive(Clone)]
pub struct UrlCache {
    backend: Arc<dyn CacheService>,
}

impl UrlCache {
    pub fn new(backend: Arc<dyn CacheService>) -> Self {
        Self { backend }
    }

    /// Builds the owner-scoped cache key.
    pub fn scoped_key(key: &str, owner: &str) -> String {
        format!("{}-{}", key, owner)
    }

    /// Writes the `{originalUrl, identifier}` projection of `record` under
    /// both its identifier and its original URL, scoped to `owner`.
    ///
    /// Both keys are written in one `set_many` call; backends without an
    /// atomic multi-key write may leave one key written if the other fails.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn put(&self, record: &UrlRecord, owner: &str) -> CacheResult<()> {
        let payload = serde_json::to_string(&record.to_cached())
            .map_err(|e| CacheError::OperationError(format!("Failed to encode record: {}", e)))?;

        let entries = [
            (Self::scoped_key(&record.identifier, owner), payload.clone()),
            (Self::scoped_key(&record.original_url, owner), payload),
        ];

        self.backend.set_many(&entries).await?;
        debug!(
            identifier = %record.identifier,
            owner = %owner,
            "Cached URL record under identifier and original URL"
        );
        Ok(())
    }

    /// Reads the record stored under `key` for `owner`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(CachedUrl))` on hit
    /// - `Ok(None)` when the key is absent
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Decode`] if the payload is not a valid record,
    /// and propagates backend failures.
    pub async fn get(&self, key: &str, owner: &str) -> CacheResult<Option<CachedUrl>> {
        let scoped = Self::scoped_key(key, owner);

        let Some(raw) = self.backend.get(&scoped).await? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| CacheError::Decode(format!("{}: {}", scoped, e)))
    }

    /// Checks if the underlying backend is healthy.
    pub async fn health_check(&self) -> bool {
        self.backend.health_check().await
    }

    /// Name of the underlying backend.
    pub fn backend_name(&self) -> &'static str {
        self.backend.backend_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cache::MemoryCache;
    use async_trait::async_trait;

    fn record(identifier: &str, url: &str) -> UrlRecord {
        UrlRecord::new(identifier.to_string(), url.to_string(), None)
    }

    fn tier() -> (UrlCache, MemoryCache) {
        let backend = MemoryCache::new();
        (UrlCache::new(Arc::new(backend.clone())), backend)
    }

    #[tokio::test]
    async fn test_put_then_get_by_identifier() {
        let (cache, _) = tier();
        let rec = record("abcDEF12", "https://example.com/long/path");

        cache.put(&rec, "203.0.113.5").await.unwrap();

        let hit = cache.get("abcDEF12", "203.0.113.5").await.unwrap().unwrap();
        assert_eq!(hit.identifier, "abcDEF12");
        assert_eq!(hit.original_url, "https://example.com/long/path");
    }

    #[tokio::test]
    async fn test_put_is_addressable_by_original_url() {
        let (cache, _) = tier();
        let rec = record("abcDEF12", "https://example.com/long/path");

        cache.put(&rec, "203.0.113.5").await.unwrap();

        let by_id = cache.get("abcDEF12", "203.0.113.5").await.unwrap();
        let by_url = cache
            .get("https://example.com/long/path", "203.0.113.5")
            .await
            .unwrap();

        assert!(by_id.is_some());
        assert_eq!(by_id, by_url);
    }

    #[tokio::test]
    async fn test_put_writes_exact_keys_and_payload() {
        let (cache, backend) = tier();
        let rec = record("abcDEF12", "https://example.com/long/path");

        cache.put(&rec, "203.0.113.5").await.unwrap();

        assert_eq!(backend.len(), 2);
        let expected = serde_json::json!({
            "originalUrl": "https://example.com/long/path",
            "identifier": "abcDEF12"
        });

        for key in [
            "abcDEF12-203.0.113.5",
            "https://example.com/long/path-203.0.113.5",
        ] {
            let raw = backend.get(key).await.unwrap().unwrap();
            let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
            assert_eq!(value, expected);
        }
    }

    #[tokio::test]
    async fn test_owner_isolation() {
        let (cache, _) = tier();
        cache
            .put(&record("abcDEF12", "https://example.com"), "10.0.0.1")
            .await
            .unwrap();

        let other = cache.get("abcDEF12", "10.0.0.2").await.unwrap();
        assert!(other.is_none());
    }

    #[tokio::test]
    async fn test_missing_key_is_not_an_error() {
        let (cache, _) = tier();
        assert!(cache.get("nothing", "owner").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_payload_is_decode_error() {
        let (cache, backend) = tier();
        backend.seed("broken-owner", "{not json");

        let result = cache.get("broken", "owner").await;
        assert!(matches!(result, Err(CacheError::Decode(_))));
    }

    struct FailingCache;

    #[async_trait]
    impl CacheService for FailingCache {
        async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
            Err(CacheError::ConnectionError("refused".to_string()))
        }

        async fn set_many(&self, _entries: &[(String, String)]) -> CacheResult<()> {
            Err(CacheError::Timeout("MSET".to_string()))
        }

        async fn health_check(&self) -> bool {
            false
        }

        fn backend_name(&self) -> &'static str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_backend_errors_propagate() {
        let cache = UrlCache::new(Arc::new(FailingCache));

        let put = cache.put(&record("abcDEF12", "https://a.com"), "o").await;
        assert!(matches!(put, Err(CacheError::Timeout(_))));

        let get = cache.get("abcDEF12", "o").await;
        assert!(matches!(get, Err(CacheError::ConnectionError(_))));

        assert!(!cache.health_check().await);
    }
}
