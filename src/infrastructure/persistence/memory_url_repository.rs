//! In-process URL repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// URL store kept in a `DashMap` keyed by identifier.
///
/// Inserts go through the map's entry API, so two concurrent inserts of the
/// same identifier cannot both succeed. Clones share storage.
#[derive(Clone, Default)]
pub struct MemoryUrlRepository {
    records: Arc<DashMap<String, UrlRecord>>,
    lookups: Arc<AtomicUsize>,
}

impl MemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a record directly, replacing any record with the same identifier.
    pub fn seed(&self, record: UrlRecord) {
        self.records.insert(record.identifier.clone(), record);
    }

    /// Number of `find_by_identifier` calls served so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl UrlRepository for MemoryUrlRepository {
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        match self.records.entry(new_record.identifier.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "urls_identifier_key" }),
            )),
            Entry::Vacant(slot) => {
                let record = UrlRecord::from(new_record);
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<UrlRecord>, AppError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        Ok(self.records.get(identifier).map(|r| r.clone()))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.records.len() as i64)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
