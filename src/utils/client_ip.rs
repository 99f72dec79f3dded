//! Owner extraction from HTTP requests.
//!
//! The owner is the client address used to partition cache keys.

use axum::http::HeaderMap;
use std::net::SocketAddr;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Determines the owner string for a request.
///
/// With `behind_proxy`, the first non-empty `X-Forwarded-For` entry wins,
/// then `X-Real-IP`; the peer address is used otherwise or when neither
/// header is usable. The value is not validated.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.5, 10.0.0.1".parse().unwrap());
///
/// let owner = owner_from_request(&headers, peer, true);
/// assert_eq!(owner, "203.0.113.5");
/// ```
pub fn owner_from_request(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy {
        let forwarded = headers
            .get(X_FORWARDED_FOR)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(ip) = forwarded {
            return ip.to_string();
        }

        let real_ip = headers
            .get(X_REAL_IP)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(ip) = real_ip {
            return ip.to_string();
        }
    }

    peer.ip().to_string()
}
