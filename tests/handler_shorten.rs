mod common;

use axum::{Router, routing::post};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::json;
use slug_shortener::api::handlers::shorten_handler;
use slug_shortener::application::services::MissPolicy;
use slug_shortener::infrastructure::cache::UrlCache;
use slug_shortener::state::AppState;

fn server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/api/shorten", post(shorten_handler))
        .layer(common::MockConnectInfoLayer::default())
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_shorten_success() {
    let (state, backends) = common::create_test_state(MissPolicy::CacheOnly);
    let server = server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/long/path" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let identifier = json["identifier"].as_str().unwrap();

    assert_eq!(identifier.len(), 8);
    assert_eq!(json["originalUrl"], "https://example.com/long/path");
    assert_eq!(json["shortUrl"], format!("{}/{}", common::BASE_URL, identifier));
    assert!(json["createdAt"].is_string());

    assert_eq!(backends.repo.len(), 1);
}

#[tokio::test]
async fn test_shorten_writes_both_cache_keys_for_owner() {
    let (state, backends) = common::create_test_state(MissPolicy::CacheOnly);
    let server = server(state);

    let response = server
        .post("/api/shorten")
        .add_header(
            HeaderName::from_static("x-forwarded-for"),
            HeaderValue::from_static("203.0.113.5"),
        )
        .json(&json!({ "url": "https://example.com/a" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let identifier = json["identifier"].as_str().unwrap();

    assert_eq!(backends.cache.len(), 2);
    assert!(
        backends
            .cache
            .contains_key(&UrlCache::scoped_key(identifier, "203.0.113.5"))
    );
    assert!(
        backends
            .cache
            .contains_key(&UrlCache::scoped_key("https://example.com/a", "203.0.113.5"))
    );
}

#[tokio::test]
async fn test_shorten_owner_from_peer_without_proxy() {
    let (state, backends) = common::create_test_state_with(MissPolicy::CacheOnly, false);
    let server = server(state);

    let response = server
        .post("/api/shorten")
        .add_header(
            HeaderName::from_static("x-forwarded-for"),
            HeaderValue::from_static("203.0.113.5"),
        )
        .json(&json!({ "url": "https://example.com/b" }))
        .await;

    response.assert_status_ok();

    assert!(
        backends
            .cache
            .contains_key(&UrlCache::scoped_key("https://example.com/b", "127.0.0.1"))
    );
    assert!(
        !backends
            .cache
            .contains_key(&UrlCache::scoped_key("https://example.com/b", "203.0.113.5"))
    );
}

#[tokio::test]
async fn test_shorten_distinct_urls_get_distinct_identifiers() {
    let (state, backends) = common::create_test_state(MissPolicy::CacheOnly);
    let server = server(state);

    let first = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/one" }))
        .await
        .json::<serde_json::Value>();

    let second = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/two" }))
        .await
        .json::<serde_json::Value>();

    assert_ne!(first["identifier"], second["identifier"]);
    assert_eq!(backends.repo.len(), 2);
}

#[tokio::test]
async fn test_shorten_same_url_twice_reuses_link() {
    let (state, backends) = common::create_test_state(MissPolicy::CacheOnly);
    let server = server(state);

    let first = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/again" }))
        .await
        .json::<serde_json::Value>();

    let second = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/again" }))
        .await;

    second.assert_status_ok();

    let second = second.json::<serde_json::Value>();
    assert_eq!(first["identifier"], second["identifier"]);
    assert_eq!(backends.repo.len(), 1);
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let (state, backends) = common::create_test_state(MissPolicy::CacheOnly);
    let server = server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "not-a-url" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");

    assert!(backends.repo.is_empty());
    assert!(backends.cache.is_empty());
}

#[tokio::test]
async fn test_shorten_rejects_non_http_scheme() {
    let (state, backends) = common::create_test_state(MissPolicy::CacheOnly);
    let server = server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "ftp://example.com/file" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(backends.repo.is_empty());
}
