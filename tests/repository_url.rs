//! PostgreSQL repository tests. Run with `cargo test -- --ignored` and a
//! reachable `DATABASE_URL`.

use chrono::Utc;
use slug_shortener::domain::entities::NewUrlRecord;
use slug_shortener::domain::repositories::UrlRepository;
use slug_shortener::error::AppError;
use slug_shortener::infrastructure::persistence::PgUrlRepository;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

fn repo(pool: PgPool) -> PgUrlRepository {
    PgUrlRepository::new(Arc::new(pool), Duration::from_secs(10))
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_insert_url(pool: PgPool) {
    let repo = repo(pool);

    let record = repo
        .insert(NewUrlRecord {
            identifier: "AwMDAwMA".to_string(),
            original_url: "https://example.com/long/path".to_string(),
            created_at: Utc::now(),
        })
        .await
        .unwrap();

    assert_eq!(record.identifier, "AwMDAwMA");
    assert_eq!(record.original_url, "https://example.com/long/path");
    assert!(record.created_at.is_some());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_find_by_identifier(pool: PgPool) {
    sqlx::query("INSERT INTO urls (identifier, original_url) VALUES ($1, $2)")
        .bind("abcDEF12")
        .bind("https://example.com")
        .execute(&pool)
        .await
        .unwrap();

    let repo = repo(pool);

    let found = repo.find_by_identifier("abcDEF12").await.unwrap();

    let record = found.unwrap();
    assert_eq!(record.original_url, "https://example.com");
    assert!(record.created_at.is_some());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_find_by_identifier_not_found(pool: PgPool) {
    let repo = repo(pool);

    let found = repo.find_by_identifier("notfound").await.unwrap();

    assert!(found.is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_duplicate_identifier_is_conflict(pool: PgPool) {
    let repo = repo(pool);

    repo.insert(NewUrlRecord::now(
        "DuP00001".to_string(),
        "https://example.com/first".to_string(),
    ))
    .await
    .unwrap();

    let err = repo
        .insert(NewUrlRecord::now(
            "DuP00001".to_string(),
            "https://example.com/second".to_string(),
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));

    let kept = repo.find_by_identifier("DuP00001").await.unwrap().unwrap();
    assert_eq!(kept.original_url, "https://example.com/first");
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_count_and_health(pool: PgPool) {
    let repo = repo(pool);

    assert!(repo.health_check().await);
    assert_eq!(repo.count().await.unwrap(), 0);

    repo.insert(NewUrlRecord::now(
        "CoUnT001".to_string(),
        "https://example.com".to_string(),
    ))
    .await
    .unwrap();

    assert_eq!(repo.count().await.unwrap(), 1);
}
