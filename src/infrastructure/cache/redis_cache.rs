//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, info};

/// Redis cache for URL records.
///
/// Uses `ConnectionManager` for connection reuse. Every command is bounded by
/// `timeout`; errors propagate to the caller.
pub struct RedisCache {
    client: ConnectionManager,
    timeout: Duration,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, timeout: Duration) -> CacheResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            timeout,
        })
    }

}

/// Runs one Redis command under `timeout`.
async fn bounded<T, F>(timeout: Duration, op: &str, fut: F) -> CacheResult<T>
where
    F: Future<Output = redis::RedisResult<T>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            error!("Redis {} error: {}", op, e);
            Err(CacheError::OperationError(e.to_string()))
        }
        Err(_) => {
            error!("Redis {} timed out after {:?}", op, timeout);
            Err(CacheError::Timeout(op.to_string()))
        }
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.client.clone();
        let value = bounded(self.timeout, "GET", conn.get::<_, Option<String>>(key)).await?;

        match &value {
            Some(_) => debug!("Cache HIT: {}", key),
            None => debug!("Cache MISS: {}", key),
        }

        Ok(value)
    }

    async fn set_many(&self, entries: &[(String, String)]) -> CacheResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut conn = self.client.clone();
        bounded(self.timeout, "MSET", conn.mset::<_, _, ()>(entries)).await?;
        debug!("Cache MSET: {} keys", entries.len());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        matches!(
            tokio::time::timeout(self.timeout, conn.ping::<()>()).await,
            Ok(Ok(()))
        )
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bounded_times_out() {
        let result: CacheResult<()> = bounded(
            Duration::from_millis(5),
            "GET",
            std::future::pending::<redis::RedisResult<()>>(),
        )
        .await;

        assert!(matches!(result, Err(CacheError::Timeout(op)) if op == "GET"));
    }

    #[tokio::test]
    async fn test_bounded_passes_values_through() {
        let result = bounded(Duration::from_secs(1), "GET", async {
            Ok::<_, redis::RedisError>(Some("v".to_string()))
        })
        .await;

        assert_eq!(result.unwrap().as_deref(), Some("v"));
    }
}
