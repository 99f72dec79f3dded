//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect},
};
use serde_json::json;
use std::net::SocketAddr;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::owner_from_request;
use crate::utils::identifier::is_valid_identifier;

/// Redirects an identifier to its original URL.
///
/// # Endpoint
///
/// `GET /{identifier}`
///
/// Resolution goes through [`crate::application::services::UrlService::lookup`]
/// scoped to the caller's address, so it follows the configured cache-miss
/// policy.
///
/// # Errors
///
/// Returns 404 Not Found if the identifier is malformed or has no record.
/// Returns 503 if the cache or store is unavailable.
pub async fn redirect_handler(
    Path(identifier): Path<String>,
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let not_found = || AppError::not_found("Short link not found", json!({ "identifier": identifier }));

    if !is_valid_identifier(&identifier) {
        return Err(not_found());
    }

    let owner = owner_from_request(&headers, addr, state.behind_proxy);

    let record = state
        .url_service
        .lookup(&identifier, &owner)
        .await?
        .ok_or_else(not_found)?;

    Ok(Redirect::temporary(&record.original_url))
}
