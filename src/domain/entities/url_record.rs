//! URL record entity and its cached projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Length of every minted identifier.
pub const IDENTIFIER_LEN: usize = 8;

/// A shortened URL mapping.
///
/// Records are immutable once created. `created_at` is only known for copies
/// read from the durable store; records adapted from the cache carry `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub identifier: String,
    pub original_url: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl UrlRecord {
    /// Creates a new record.
    pub fn new(
        identifier: String,
        original_url: String,
        created_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            identifier,
            original_url,
            created_at,
        }
    }

    /// Returns the cacheable projection of this record.
    pub fn to_cached(&self) -> CachedUrl {
        CachedUrl {
            original_url: self.original_url.clone(),
            identifier: self.identifier.clone(),
        }
    }
}

/// Cache payload: exactly `originalUrl` and `identifier`, nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CachedUrl {
    pub original_url: String,
    pub identifier: String,
}

impl From<CachedUrl> for UrlRecord {
    fn from(cached: CachedUrl) -> Self {
        UrlRecord::new(cached.identifier, cached.original_url, None)
    }
}

/// Input data for inserting a record into the durable store.
#[derive(Debug, Clone)]
pub struct NewUrlRecord {
    pub identifier: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl NewUrlRecord {
    /// Stamps a new record with the current time.
    pub fn now(identifier: String, original_url: String) -> Self {
        Self {
            identifier,
            original_url,
            created_at: Utc::now(),
        }
    }
}

impl From<NewUrlRecord> for UrlRecord {
    fn from(new: NewUrlRecord) -> Self {
        UrlRecord::new(new.identifier, new.original_url, Some(new.created_at))
    }
}
