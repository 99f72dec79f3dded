//! Identifier shape checks.

use regex::Regex;
use std::sync::LazyLock;

/// Minted identifiers: exactly eight URL-safe base64 characters.
static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{8}$").expect("identifier regex is valid"));

/// Returns true if `candidate` could be a minted identifier.
pub fn is_valid_identifier(candidate: &str) -> bool {
    IDENTIFIER_REGEX.is_match(candidate)
}
