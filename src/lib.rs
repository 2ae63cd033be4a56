pub mod cli;
pub mod errors;
pub mod export;
pub mod hooks;
pub mod import;
pub mod logger;
pub mod profiles;
pub mod store;
pub mod types;

use std::io::Read;
use std::path::Path;

use crate::errors::PortError;
use crate::export::{ExportOptions, ExportReport};
use crate::hooks::RowHooks;
use crate::import::{ImportOptions, ImportReport};
use crate::store::{JsonFileStore, MemoryStore, RecordStore};

/// Facade tying one record store to the import/export pipelines.
pub struct Porter {
    store: Box<dyn RecordStore>,
}

impl Porter {
    /// In-memory porter with no persistence.
    #[must_use]
    pub fn in_memory() -> Self {
        Self { store: Box::new(MemoryStore::new()) }
    }

    /// Porter backed by a JSON store file at `path`.
    ///
    /// # Errors
    /// Fails when the store file exists but cannot be read or parsed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PortError> {
        Ok(Self { store: Box::new(JsonFileStore::open(path)?) })
    }

    /// Wrap an externally built store.
    #[must_use]
    pub fn with_store(store: Box<dyn RecordStore>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    /// Import a CSV file into the configured collection.
    pub fn import_csv<P: AsRef<Path>>(
        &self,
        path: P,
        opts: &ImportOptions,
        hooks: &dyn RowHooks,
    ) -> ImportReport {
        import::import_file(self.store.as_ref(), path, opts, hooks)
    }

    /// Import CSV text from an arbitrary reader.
    pub fn import_csv_from<R: Read>(
        &self,
        reader: R,
        opts: &ImportOptions,
        hooks: &dyn RowHooks,
    ) -> ImportReport {
        import::import_from_reader(self.store.as_ref(), reader, opts, hooks)
    }

    /// Export a collection to a CSV file; `Ok(None)` when it holds no
    /// records.
    ///
    /// # Errors
    /// Store fetch and file write failures.
    pub fn export_csv<P: AsRef<Path>>(
        &self,
        collection: &str,
        dest: P,
        opts: &ExportOptions,
        hooks: &dyn RowHooks,
    ) -> Result<Option<ExportReport>, PortError> {
        export::export_file(self.store.as_ref(), collection, dest, opts, hooks)
    }
}

/// Initializes logging.
///
/// This function should be called once at the beginning of the application's
/// execution.
///
/// # Errors
/// Propagates log4rs initialization failures.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    logger::init(None)
}
