//! Repository trait for the durable URL store.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable store for URL records.
///
/// Every call is bounded by the implementation's store timeout and fails with
/// [`AppError::Unavailable`] when it is exceeded.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryUrlRepository`] - In-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a record with the same identifier exists.
    /// Returns [`AppError::Unavailable`] on timeouts or connectivity failures.
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Finds a record by identifier.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlRecord))` if found
    /// - `Ok(None)` if no record has this identifier
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Counts stored records.
    async fn count(&self) -> Result<i64, AppError>;

    /// Checks if the store is reachable.
    async fn health_check(&self) -> bool;
}
