use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde_json::Value;
use tempfile::NamedTempFile;

use super::{RecordStore, filter_by_field};
use crate::errors::StoreError;
use crate::types::{Record, RecordId, field_is_empty};

/// File-backed store: all collections live in one JSON document on disk,
/// loaded at open and rewritten atomically (temp file + persist) after each
/// insert batch.
pub struct JsonFileStore {
    path: PathBuf,
    collections: RwLock<HashMap<String, Vec<Record>>>,
}

impl JsonFileStore {
    /// Open or create the store file at `path`.
    ///
    /// # Errors
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let collections = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| StoreError::Io(e.to_string()))?;
            if raw.trim().is_empty() { HashMap::new() } else { serde_json::from_str(&raw)? }
        } else {
            HashMap::new()
        };
        log::info!("store: opened {}, collections={}", path.display(), collections.len());
        Ok(Self { path, collections: RwLock::new(collections) })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StoreError> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        let mut tmp = NamedTempFile::new_in(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        serde_json::to_writer_pretty(&mut tmp, &*self.collections.read())?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error.to_string()))?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
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
        let inserted = {
            let mut collections = self.collections.write();
            let bucket = collections.entry(collection.to_string()).or_default();
            let inserted = records.len();
            for mut record in records {
                if field_is_empty(&record, "id") {
                    record.insert("id".into(), Value::String(RecordId::new().to_string()));
                }
                bucket.push(record);
            }
            inserted
        };
        self.persist()?;
        Ok(inserted)
    }

    fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        let mut names: Vec<String> = self.collections.read().keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
