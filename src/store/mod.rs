mod jsonfile;
mod memory;

pub use jsonfile::JsonFileStore;
pub use memory::MemoryStore;

use std::collections::HashSet;

use crate::errors::StoreError;
use crate::types::{Record, value_to_string};

/// Storage seam consumed by the import/export pipelines.
///
/// Implementations are injected at call time; nothing in this crate holds a
/// process-wide store instance. `find_by_field_in` followed by `insert` is
/// not wrapped in any transaction, so two concurrent imports targeting the
/// same unique values can both pass the duplicate check and both insert.
pub trait RecordStore: Send + Sync {
    /// All records of the collection. Unknown collections read as empty.
    ///
    /// # Errors
    /// Backend read failures.
    fn fetch_all(&self, collection: &str) -> Result<Vec<Record>, StoreError>;

    /// Records whose `field` value, lower-cased, is one of `values`.
    /// Callers pass `values` already lower-cased.
    ///
    /// # Errors
    /// Backend read failures.
    fn find_by_field_in(
        &self,
        collection: &str,
        field: &str,
        values: &[String],
    ) -> Result<Vec<Record>, StoreError>;

    /// Insert a batch, creating the collection on demand. Records without an
    /// `id` field get a fresh one. Returns the number inserted.
    ///
    /// # Errors
    /// Backend write failures.
    fn insert(&self, collection: &str, records: Vec<Record>) -> Result<usize, StoreError>;

    /// Names of all collections, sorted.
    ///
    /// # Errors
    /// Backend read failures.
    fn list_collections(&self) -> Result<Vec<String>, StoreError>;

    /// Number of records in the collection.
    ///
    /// # Errors
    /// Backend read failures.
    fn count(&self, collection: &str) -> Result<usize, StoreError> {
        Ok(self.fetch_all(collection)?.len())
    }
}

/// Case-insensitive membership filter shared by the bundled stores.
pub(crate) fn filter_by_field(records: &[Record], field: &str, values: &[String]) -> Vec<Record> {
    let wanted: HashSet<&str> = values.iter().map(String::as_str).collect();
    records
        .iter()
        .filter(|r| {
            r.get(field).is_some_and(|v| wanted.contains(value_to_string(v).to_lowercase().as_str()))
        })
        .cloned()
        .collect()
}
