use std::collections::HashSet;
use std::io::Read;

use serde_json::Value;

use super::options::{DuplicateRow, ImportOptions, RowError};
use crate::errors::PortError;
use crate::hooks::RowHooks;
use crate::types::{Record, field_is_empty, unique_key};

#[derive(Debug, Default)]
pub(crate) struct ParsedBatch {
    /// Survivors in file order.
    pub records: Vec<Record>,
    pub errors: Vec<RowError>,
    pub duplicates: Vec<DuplicateRow>,
}

/// Classify every data row of `reader` into survivor / error / duplicate.
///
/// # Errors
/// Only structural problems abort: an unreadable header, or required fields
/// missing from the header row. Row-level problems are collected instead.
pub(crate) fn parse_rows<R: Read>(
    reader: R,
    opts: &ImportOptions,
    hooks: &dyn RowHooks,
) -> Result<ParsedBatch, PortError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(opts.csv.delimiter)
        .flexible(true)
        .trim(if opts.csv.trim { csv::Trim::All } else { csv::Trim::None })
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(ToString::to_string).collect();
    let missing: Vec<&str> = opts
        .required_fields
        .iter()
        .map(String::as_str)
        .filter(|f| !headers.iter().any(|h| h == f))
        .collect();
    if !missing.is_empty() {
        return Err(PortError::MissingHeaders(missing.join(", ")));
    }

    let mut batch = ParsedBatch::default();
    let mut seen: HashSet<String> = HashSet::new();
    let mut line_hint = 1usize; // header line

    for rec in rdr.records() {
        let rec = match rec {
            Ok(r) => r,
            Err(e) => {
                let row = e.position().map_or(line_hint + 1, |p| p.line() as usize);
                line_hint = row;
                batch.errors.push(RowError { row, error: e.to_string() });
                continue;
            }
        };
        let row = rec.position().map_or(line_hint + 1, |p| p.line() as usize);
        line_hint = row;

        // A lone blank field is what a whitespace-only line parses to; fully
        // empty lines the reader drops on its own.
        if rec.len() <= 1 && rec.get(0).is_none_or(str::is_empty) {
            continue;
        }

        // Zip against header positions; missing trailing fields map to "".
        let mut raw = Record::new();
        for (i, header) in headers.iter().enumerate() {
            let field = rec.get(i).unwrap_or("");
            raw.insert(header.clone(), field_value(field, opts.csv.type_infer));
        }

        let record = hooks.transform(raw);

        if let Some(field) = opts.required_fields.iter().find(|f| field_is_empty(&record, f.as_str())) {
            batch.errors.push(RowError { row, error: format!("{field} is required") });
            continue;
        }

        if let Err(reason) = hooks.validate(&record, row) {
            batch.errors.push(RowError { row, error: reason });
            continue;
        }

        if let Some(key) = unique_key(&record, &opts.unique_field) {
            if seen.contains(&key) {
                batch.duplicates.push(DuplicateRow { row, identifier: key });
                continue;
            }
            seen.insert(key);
        }
        batch.records.push(record);
    }
    Ok(batch)
}

fn field_value(field: &str, infer: bool) -> Value {
    if !infer {
        return Value::String(field.to_string());
    }
    if let Ok(i) = field.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Ok(f) = field.parse::<f64>()
        && let Some(n) = serde_json::Number::from_f64(f)
    {
        return Value::Number(n);
    }
    match field.to_lowercase().as_str() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(field.to_string()),
    }
}
