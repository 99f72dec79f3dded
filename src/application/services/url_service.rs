//! URL record creation and lookup.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::slug_generator::SlugGenerator;
use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::UrlCache;

/// What `lookup` does when the cache has no entry for an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissPolicy {
    /// Treat a cache miss as "no record" without consulting the durable store.
    #[default]
    CacheOnly,
    /// Query the durable store and repopulate the cache on a hit.
    DurableFallback,
}

/// Bounds for the random component mixed into slug candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlugRange {
    pub min: i64,
    pub max: i64,
}

impl Default for SlugRange {
    fn default() -> Self {
        Self {
            min: 1_000,
            max: 999_999,
        }
    }
}

/// Orchestrates the durable store, the cache tier and the slug generator.
///
/// Writes go to the durable store first and are then mirrored into the
/// cache. Reads are served from the cache; see [`MissPolicy`] for what a
/// miss means.
pub struct UrlService<R: UrlRepository + ?Sized = dyn UrlRepository> {
    url_repository: Arc<R>,
    cache: UrlCache,
    slug_generator: SlugGenerator<R>,
    slug_range: SlugRange,
    miss_policy: MissPolicy,
}

impl<R: UrlRepository + ?Sized> UrlService<R> {
    /// Creates a new service.
    pub fn new(
        url_repository: Arc<R>,
        cache: UrlCache,
        max_slug_attempts: usize,
        slug_range: SlugRange,
        miss_policy: MissPolicy,
    ) -> Self {
        Self {
            slug_generator: SlugGenerator::new(url_repository.clone(), max_slug_attempts),
            url_repository,
            cache,
            slug_range,
            miss_policy,
        }
    }

    pub fn miss_policy(&self) -> MissPolicy {
        self.miss_policy
    }

    /// Shortens `original_url` for `owner`, reusing the link this owner
    /// already has for the same URL.
    ///
    /// The cache entry keyed by the original URL is checked first; only on a
    /// miss is a new identifier minted through [`Self::create`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::create`].
    pub async fn shorten(&self, original_url: &str, owner: &str) -> Result<UrlRecord, AppError> {
        if let Some(cached) = self.cache.get(original_url, owner).await? {
            debug!(identifier = %cached.identifier, "Reusing cached short link for URL");
            return Ok(cached.into());
        }

        self.create(original_url, "", owner).await
    }

    /// Creates a record for `original_url`, or returns the existing one.
    ///
    /// An empty `identifier` asks the slug generator to mint one.
    ///
    /// # Flow
    ///
    /// 1. `lookup(identifier, owner)`; a hit is returned unchanged
    /// 2. Insert into the durable store (no cache write on failure)
    /// 3. Write through to the cache for `owner`
    ///
    /// For a caller-supplied identifier, a unique-constraint conflict on
    /// insert means another request created it first; that record is read
    /// back, cached and returned. A minted identifier that loses the same
    /// race is a collision: a new one is minted within the remaining
    /// attempt budget.
    ///
    /// # Errors
    ///
    /// Propagates store, cache and slug-generation errors. A cache failure
    /// after a successful insert is reported even though the record exists.
    pub async fn create(
        &self,
        original_url: &str,
        identifier: &str,
        owner: &str,
    ) -> Result<UrlRecord, AppError> {
        if identifier.is_empty() {
            return self.create_minted(original_url, owner).await;
        }

        if let Some(existing) = self.lookup(identifier, owner).await? {
            debug!(identifier = %identifier, "Record already exists, returning it");
            return Ok(existing);
        }

        let new_record = NewUrlRecord::now(identifier.to_string(), original_url.to_string());

        let record = match self.url_repository.insert(new_record).await {
            Ok(record) => record,
            Err(AppError::Conflict { .. }) => {
                warn!(identifier = %identifier, "Concurrent create detected, keeping first write");
                self.url_repository
                    .find_by_identifier(identifier)
                    .await?
                    .ok_or_else(|| {
                        AppError::internal(
                            "Record vanished after unique violation",
                            serde_json::json!({ "identifier": identifier }),
                        )
                    })?
            }
            Err(e) => return Err(e),
        };

        self.write_through(record, owner).await
    }

    async fn create_minted(&self, original_url: &str, owner: &str) -> Result<UrlRecord, AppError> {
        let mut next_attempt = 0;

        loop {
            let (identifier, attempt) = self
                .slug_generator
                .generate_slug_from(
                    original_url,
                    self.slug_range.min,
                    self.slug_range.max,
                    next_attempt,
                )
                .await?;
            next_attempt = attempt + 1;

            if let Some(existing) = self.lookup(&identifier, owner).await? {
                if existing.original_url == original_url {
                    return Ok(existing);
                }
                warn!(identifier = %identifier, "Minted identifier cached for another URL, regenerating");
                continue;
            }

            let new_record = NewUrlRecord::now(identifier.clone(), original_url.to_string());

            match self.url_repository.insert(new_record).await {
                Ok(record) => return self.write_through(record, owner).await,
                Err(AppError::Conflict { .. }) => {
                    warn!(identifier = %identifier, "Minted identifier taken concurrently, regenerating");
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn write_through(&self, record: UrlRecord, owner: &str) -> Result<UrlRecord, AppError> {
        self.cache.put(&record, owner).await?;

        info!(
            identifier = %record.identifier,
            original_url = %record.original_url,
            "Created URL record"
        );

        Ok(record)
    }

    /// Finds the record for `identifier` as seen by `owner`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` on a cache hit (no `created_at`), or on a durable
    ///   hit under [`MissPolicy::DurableFallback`]
    /// - `Ok(None)` when there is no record
    ///
    /// # Errors
    ///
    /// Cache failures other than a missing key are surfaced, including
    /// [`AppError::Decode`] for a corrupt payload.
    pub async fn lookup(
        &self,
        identifier: &str,
        owner: &str,
    ) -> Result<Option<UrlRecord>, AppError> {
        if let Some(cached) = self.cache.get(identifier, owner).await? {
            debug!(identifier = %identifier, "Cache HIT");
            return Ok(Some(cached.into()));
        }

        match self.miss_policy {
            MissPolicy::CacheOnly => {
                debug!(identifier = %identifier, "Cache MISS, no durable fallback");
                Ok(None)
            }
            MissPolicy::DurableFallback => {
                debug!(identifier = %identifier, "Cache MISS, querying durable store");

                let Some(record) = self.url_repository.find_by_identifier(identifier).await?
                else {
                    return Ok(None);
                };

                self.cache.put(&record, owner).await?;
                Ok(Some(record))
            }
        }
    }

    /// Checks the durable store and the cache.
    pub async fn health(&self) -> (bool, bool) {
        let store = self.url_repository.health_check().await;
        let cache = self.cache.health_check().await;
        (store, cache)
    }

    /// Name of the cache backend in use.
    pub fn cache_backend(&self) -> &'static str {
        self.cache.backend_name()
    }
}
