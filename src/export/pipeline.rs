use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tempfile::NamedTempFile;

use super::options::{ExportOptions, ExportReport};
use crate::errors::PortError;
use crate::hooks::RowHooks;
use crate::store::RecordStore;
use crate::types::value_to_string;

/// Dated filename for a collection export, `<stem>_export_<YYYY-MM-DD>.csv`.
#[must_use]
pub fn export_filename(stem: &str) -> String {
    format!("{stem}_export_{}.csv", Utc::now().format("%Y-%m-%d"))
}

/// Serialize a whole collection into `writer`.
///
/// The column set is data-driven: the sorted union of all field names across
/// the fetched records, minus `exclude_fields`. Returns `Ok(None)` when the
/// collection has no records; nothing is written in that case.
///
/// # Errors
/// Store fetch failures and CSV/IO write failures propagate; there is no
/// retry.
pub fn export_into_writer<W: Write>(
    store: &dyn RecordStore,
    collection: &str,
    writer: W,
    opts: &ExportOptions,
    hooks: &dyn RowHooks,
) -> Result<Option<ExportReport>, PortError> {
    let records = store.fetch_all(collection)?;
    if records.is_empty() {
        log::info!("export: collection={collection} is empty, nothing to write");
        return Ok(None);
    }
    let records = hooks.transform_export(records);

    let mut columns: BTreeSet<&str> = BTreeSet::new();
    for record in &records {
        for key in record.keys() {
            if !opts.exclude_fields.iter().any(|f| f == key) {
                columns.insert(key.as_str());
            }
        }
    }
    let columns: Vec<&str> = columns.into_iter().collect();

    let quote_style =
        if opts.csv.quote_all { csv::QuoteStyle::Always } else { csv::QuoteStyle::Necessary };
    let mut w = csv::WriterBuilder::new()
        .delimiter(opts.csv.delimiter)
        .quote_style(quote_style)
        .from_writer(writer);
    w.write_record(&columns)?;

    let mut report = ExportReport::default();
    for record in &records {
        let row: Vec<String> =
            columns.iter().map(|c| record.get(*c).map(value_to_string).unwrap_or_default()).collect();
        w.write_record(&row)?;
        report.written += 1;
    }
    w.flush()?;
    log::info!("export: collection={collection}, written={}", report.written);
    Ok(Some(report))
}

/// Export a collection to `path` atomically via a temp file + persist.
/// The destination is only created when the collection has records.
///
/// # Errors
/// Propagates fetch and write failures; an existing file at `path` is left
/// untouched on failure.
pub fn export_file<P: AsRef<Path>>(
    store: &dyn RecordStore,
    collection: &str,
    path: P,
    opts: &ExportOptions,
    hooks: &dyn RowHooks,
) -> Result<Option<ExportReport>, PortError> {
    let dest = path.as_ref();
    log::info!("export: collection={collection}, path={}", dest.display());
    let parent =
        dest.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
    if !parent.exists() {
        std::fs::create_dir_all(parent)?;
    }
    let mut tmp = NamedTempFile::new_in(parent)?;
    let Some(report) = export_into_writer(store, collection, &mut tmp, opts, hooks)? else {
        return Ok(None);
    };
    tmp.persist(dest).map_err(|e| PortError::Io(e.error))?;
    Ok(Some(report))
}

/// Export into `dir` under the dated `<stem>_export_<date>.csv` name and
/// return the written path, or `None` for an empty collection.
///
/// # Errors
/// Same failure surface as [`export_file`].
pub fn export_to_dir<P: AsRef<Path>>(
    store: &dyn RecordStore,
    collection: &str,
    dir: P,
    opts: &ExportOptions,
    hooks: &dyn RowHooks,
) -> Result<Option<PathBuf>, PortError> {
    let stem = opts.filename.as_deref().unwrap_or(collection);
    let dest = dir.as_ref().join(export_filename(stem));
    Ok(export_file(store, collection, &dest, opts, hooks)?.map(|_| dest))
}
