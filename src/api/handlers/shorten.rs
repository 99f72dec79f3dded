//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{ConnectInfo, State},
    http::HeaderMap,
};
use serde_json::json;
use std::net::SocketAddr;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::owner_from_request;
use crate::utils::url_validator::validate_target_url;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/long/path" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "identifier": "abcDEF12",
///   "originalUrl": "https://example.com/long/path",
///   "shortUrl": "http://localhost:3000/abcDEF12",
///   "createdAt": "2025-01-01T00:00:00Z"
/// }
/// ```
///
/// The record is cached for the calling client's address only. Shortening
/// a URL this client already shortened returns the existing link.
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is invalid, 503 if the store or cache
/// is unavailable.
pub async fn shorten_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    validate_target_url(&payload.url).map_err(|e| {
        AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() }))
    })?;

    let owner = owner_from_request(&headers, addr, state.behind_proxy);

    let record = state.url_service.shorten(&payload.url, &owner).await?;

    Ok(Json(ShortenResponse {
        short_url: state.short_url(&record.identifier),
        identifier: record.identifier,
        original_url: record.original_url,
        created_at: record.created_at,
    }))
}
