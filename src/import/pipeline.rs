use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::options::{DuplicateRow, ImportOptions, ImportReport, RowError};
use super::parse::parse_rows;
use crate::errors::PortError;
use crate::hooks::RowHooks;
use crate::store::RecordStore;
use crate::types::{Record, unique_key};

/// Import a delimited file into the target collection.
///
/// Never returns an error: every outcome, including structural and store
/// failures, is folded into the report.
pub fn import_file<P: AsRef<Path>>(
    store: &dyn RecordStore,
    path: P,
    opts: &ImportOptions,
    hooks: &dyn RowHooks,
) -> ImportReport {
    log::info!("import: path={}, collection={}", path.as_ref().display(), opts.collection);
    let file = match File::open(&path) {
        Ok(f) => f,
        Err(e) => return failed_report(&PortError::Io(e), Vec::new(), Vec::new()),
    };
    import_from_reader(store, BufReader::new(file), opts, hooks)
}

/// Import delimited text from an arbitrary reader.
pub fn import_from_reader<R: Read>(
    store: &dyn RecordStore,
    reader: R,
    opts: &ImportOptions,
    hooks: &dyn RowHooks,
) -> ImportReport {
    let batch = match parse_rows(reader, opts, hooks) {
        Ok(b) => b,
        Err(e) => return failed_report(&e, Vec::new(), Vec::new()),
    };
    let (records, errors, duplicates) = (batch.records, batch.errors, batch.duplicates);

    match insert_survivors(store, opts, records) {
        Ok((imported, store_duplicates)) => {
            let report = ImportReport {
                success: true,
                imported,
                skipped: duplicates.len() + store_duplicates,
                details: summarize(store_duplicates, duplicates.len(), errors.len()),
                message: format!("Successfully imported {imported} records."),
                errors,
                duplicates,
            };
            log::info!(
                "import: collection={}, imported={}, skipped={}, errors={}",
                opts.collection,
                report.imported,
                report.skipped,
                report.errors.len()
            );
            report
        }
        Err(e) => failed_report(&e, errors, duplicates),
    }
}

/// Partition survivors against the store and insert the genuinely new ones
/// in a single batch. Returns (inserted, store-duplicate count).
fn insert_survivors(
    store: &dyn RecordStore,
    opts: &ImportOptions,
    records: Vec<Record>,
) -> Result<(usize, usize), PortError> {
    if records.is_empty() {
        return Ok((0, 0));
    }
    if !opts.check_store_duplicates {
        let imported = store.insert(&opts.collection, records)?;
        return Ok((imported, 0));
    }

    let values: Vec<String> =
        records.iter().filter_map(|r| unique_key(r, &opts.unique_field)).collect();
    let existing = store.find_by_field_in(&opts.collection, &opts.unique_field, &values)?;
    let existing: HashSet<String> =
        existing.iter().filter_map(|r| unique_key(r, &opts.unique_field)).collect();

    let (dupes, fresh): (Vec<Record>, Vec<Record>) = records
        .into_iter()
        .partition(|r| unique_key(r, &opts.unique_field).is_some_and(|k| existing.contains(&k)));
    let store_duplicates = dupes.len();
    let imported = if fresh.is_empty() { 0 } else { store.insert(&opts.collection, fresh)? };
    Ok((imported, store_duplicates))
}

/// Store and structural failures fold into a failed report. Row
/// classification already gathered is preserved rather than discarded.
fn failed_report(err: &PortError, errors: Vec<RowError>, duplicates: Vec<DuplicateRow>) -> ImportReport {
    log::error!("import failed: {err}");
    ImportReport {
        success: false,
        imported: 0,
        skipped: 0,
        errors,
        duplicates,
        message: "Import failed".to_string(),
        details: err.to_string(),
    }
}

fn summarize(store_duplicates: usize, file_duplicates: usize, error_rows: usize) -> String {
    let mut lines = Vec::new();
    if store_duplicates > 0 {
        lines.push(format!("{store_duplicates} records skipped (already exist in the target collection)."));
    }
    if file_duplicates > 0 {
        lines.push(format!("{file_duplicates} duplicates found in the import file."));
    }
    if error_rows > 0 {
        lines.push(format!("{error_rows} rows had errors and were skipped."));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::NoHooks;
    use crate::store::MemoryStore;
    use std::io::Cursor;

    #[test]
    fn summary_lines_cover_each_bucket() {
        let s = summarize(2, 1, 3);
        assert!(s.contains("2 records skipped"));
        assert!(s.contains("1 duplicates found"));
        assert!(s.contains("3 rows had errors"));
        assert_eq!(summarize(0, 0, 0), "");
    }

    #[test]
    fn import_missing_file_reports_failure() {
        let store = MemoryStore::new();
        let opts = ImportOptions { collection: "c".into(), ..ImportOptions::default() };
        let report = import_file(&store, "/nonexistent/rows.csv", &opts, &NoHooks);
        assert!(!report.success);
        assert_eq!(report.imported, 0);
        assert_eq!(report.message, "Import failed");
    }

    #[test]
    fn empty_input_imports_nothing() {
        let store = MemoryStore::new();
        let opts = ImportOptions {
            collection: "c".into(),
            unique_field: "name".into(),
            ..ImportOptions::default()
        };
        let report = import_from_reader(&store, Cursor::new("name\n"), &opts, &NoHooks);
        assert!(report.success);
        assert_eq!(report.imported, 0);
        assert_eq!(report.skipped, 0);
        assert!(report.errors.is_empty());
    }
}
