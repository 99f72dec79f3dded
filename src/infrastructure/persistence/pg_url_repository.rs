//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

#[derive(Debug, FromRow)]
struct UrlRow {
    identifier: String,
    original_url: String,
    created_at: DateTime<Utc>,
}

impl From<UrlRow> for UrlRecord {
    fn from(row: UrlRow) -> Self {
        UrlRecord::new(row.identifier, row.original_url, Some(row.created_at))
    }
}

/// PostgreSQL repository for URL records.
///
/// Uniqueness of `identifier` is enforced by the `urls_identifier_key`
/// constraint; a duplicate insert surfaces as [`AppError::Conflict`].
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
    timeout: Duration,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool and a per-query timeout.
    pub fn new(pool: Arc<PgPool>, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(AppError::from),
            Err(_) => {
                tracing::error!("Database {} timed out after {:?}", op, self.timeout);
                Err(AppError::unavailable(
                    "Database call timed out",
                    json!({ "operation": op, "timeout_secs": self.timeout.as_secs() }),
                ))
            }
        }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let row = self
            .bounded(
                "insert",
                sqlx::query_as::<_, UrlRow>(
                    r#"
                    INSERT INTO urls (identifier, original_url, created_at)
                    VALUES ($1, $2, $3)
                    RETURNING identifier, original_url, created_at
                    "#,
                )
                .bind(&new_record.identifier)
                .bind(&new_record.original_url)
                .bind(new_record.created_at)
                .fetch_one(self.pool.as_ref()),
            )
            .await?;

        Ok(row.into())
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = self
            .bounded(
                "find_by_identifier",
                sqlx::query_as::<_, UrlRow>(
                    r#"
                    SELECT identifier, original_url, created_at
                    FROM urls
                    WHERE identifier = $1
                    "#,
                )
                .bind(identifier)
                .fetch_optional(self.pool.as_ref()),
            )
            .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.bounded(
            "count",
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM urls").fetch_one(self.pool.as_ref()),
        )
        .await
    }

    async fn health_check(&self) -> bool {
        self.bounded(
            "health_check",
            sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(self.pool.as_ref()),
        )
        .await
        .is_ok()
    }
}
