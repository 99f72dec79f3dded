//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::UrlService;

/// State shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService>,
    /// Prefix for short URLs returned to clients.
    pub base_url: String,
    /// Read the owner address from forwarding headers.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(url_service: Arc<UrlService>, base_url: String, behind_proxy: bool) -> Self {
        Self {
            url_service,
            base_url,
            behind_proxy,
        }
    }

    /// Builds the public short URL for an identifier.
    pub fn short_url(&self, identifier: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), identifier)
    }
}
