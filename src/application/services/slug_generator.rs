//! Collision-checked slug generation.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use rand::Rng;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::entities::url_record::IDENTIFIER_LEN;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Default bound on candidates tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Returns a pseudo-random integer uniformly drawn from `[min, max]`.
///
/// Reversed bounds describe the same interval.
pub fn random_int(min: i64, max: i64) -> i64 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rand::rng().random_range(lo..=hi)
}

/// Encodes `seed` as URL-safe base64 without padding and keeps the last
/// [`IDENTIFIER_LEN`] characters.
pub fn encode_candidate(seed: &str) -> String {
    let encoded = URL_SAFE_NO_PAD.encode(seed.as_bytes());
    encoded[encoded.len().saturating_sub(IDENTIFIER_LEN)..].to_string()
}

/// Candidate for the first attempt: `{url}+{random}+{timestamp}`.
pub fn first_candidate(long_url: &str, random: i64, timestamp: i64) -> String {
    encode_candidate(&format!("{}+{}+{}", long_url, random, timestamp))
}

/// Candidate for every later attempt: `{timestamp}{url}{random}`.
pub fn retry_candidate(long_url: &str, random: i64, timestamp: i64) -> String {
    encode_candidate(&format!("{}{}{}", timestamp, long_url, random))
}

/// Mints identifiers that are free in the durable store at the time of the
/// last check.
///
/// Two concurrent generators can still return the same identifier; the
/// store's uniqueness constraint decides which insert wins.
pub struct SlugGenerator<R: UrlRepository + ?Sized = dyn UrlRepository> {
    url_repository: Arc<R>,
    max_attempts: usize,
}

impl<R: UrlRepository + ?Sized> SlugGenerator<R> {
    /// Creates a generator that tries at most `max_attempts` candidates.
    ///
    /// A zero bound is raised to one.
    pub fn new(url_repository: Arc<R>, max_attempts: usize) -> Self {
        Self {
            url_repository,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Generates an identifier for `long_url`.
    ///
    /// Each attempt draws a fresh random number in `[min_rand, max_rand]` and
    /// reads the current Unix timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::SlugExhausted`] when every attempt collides.
    /// Propagates durable-store errors from the collision check.
    pub async fn generate_slug(
        &self,
        long_url: &str,
        min_rand: i64,
        max_rand: i64,
    ) -> Result<String, AppError> {
        self.generate_slug_from(long_url, min_rand, max_rand, 0)
            .await
            .map(|(slug, _)| slug)
    }

    /// Like [`Self::generate_slug`], but starts counting at attempt `start`
    /// and also returns the attempt index that produced the identifier.
    ///
    /// Callers that find out about a collision later (a unique violation on
    /// insert) resume from the next index, so the whole create shares one
    /// attempt budget.
    pub async fn generate_slug_from(
        &self,
        long_url: &str,
        min_rand: i64,
        max_rand: i64,
        start: usize,
    ) -> Result<(String, usize), AppError> {
        for attempt in start..self.max_attempts {
            let random = random_int(min_rand, max_rand);
            let timestamp = Utc::now().timestamp();

            let candidate = if attempt == 0 {
                first_candidate(long_url, random, timestamp)
            } else {
                retry_candidate(long_url, random, timestamp)
            };

            if self
                .url_repository
                .find_by_identifier(&candidate)
                .await?
                .is_none()
            {
                debug!(attempt, identifier = %candidate, "Minted identifier");
                return Ok((candidate, attempt));
            }

            warn!(attempt, identifier = %candidate, "Identifier collision, regenerating");
        }

        Err(self.exhausted())
    }

    fn exhausted(&self) -> AppError {
        AppError::slug_exhausted(
            "Failed to generate unique identifier",
            json!({ "reason": "Too many collisions", "attempts": self.max_attempts }),
        )
    }
}
