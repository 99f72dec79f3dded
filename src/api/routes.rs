//! API route configuration.

use crate::api::handlers::shorten_handler;
use crate::state::AppState;
use axum::{Router, routing::post};

/// API routes mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten` - Create (or return the existing) short link for a URL
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/shorten", post(shorten_handler))
}
