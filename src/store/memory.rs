use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::Value;

use super::{RecordStore, filter_by_field};
use crate::errors::StoreError;
use crate::types::{Record, RecordId, field_is_empty};

/// In-memory store for tests and embedding. State lives only as long as the
/// value itself.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Record>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held by `collection`.
    #[must_use]
    pub fn len(&self, collection: &str) -> usize {
        self.collections.read().get(collection).map_or(0, Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

impl RecordStore for MemoryStore {
    fn fetch_all(&self, collection: &str) -> Result<Vec<Record>, StoreError> {
        Ok(self.collections.read().get(collection).cloned().unwrap_or_default())
    }

    fn find_by_field_in(
        &self,
        collection: &str,
        field: &str,
        values: &[String],
    ) -> Result<Vec<Record>, StoreError> {
        let collections = self.collections.read();
        let Some(records) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(filter_by_field(records, field, values))
    }

    fn insert(&self, collection: &str, records: Vec<Record>) -> Result<usize, StoreError> {
        let mut collections = self.collections.write();
        let bucket = collections.entry(collection.to_string()).or_default();
        let inserted = records.len();
        for mut record in records {
            if field_is_empty(&record, "id") {
                record.insert("id".into(), Value::String(RecordId::new().to_string()));
            }
            bucket.push(record);
        }
        Ok(inserted)
    }

    fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        let mut names: Vec<String> = self.collections.read().keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
