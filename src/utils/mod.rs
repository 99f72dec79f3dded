//! Utility functions for request handling and input checks.
//!
//! - [`client_ip`] - Owner (client address) extraction from requests
//! - [`identifier`] - Identifier shape checks
//! - [`url_validator`] - Target URL validation

pub mod client_ip;
pub mod identifier;
pub mod url_validator;
