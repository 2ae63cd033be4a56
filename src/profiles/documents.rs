use chrono::Utc;
use serde_json::Value;

use super::Profile;
use crate::export::ExportOptions;
use crate::hooks::RowHooks;
use crate::import::ImportOptions;
use crate::types::{Record, field_is_empty};

/// Document metadata: unique by name, `;`-delimited tag lists split into
/// arrays on the way in and re-joined on the way out.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentProfile;

impl Profile for DocumentProfile {
    fn import_options(&self) -> ImportOptions {
        ImportOptions {
            collection: "documents".into(),
            required_fields: vec!["name".into(), "type".into()],
            unique_field: "name".into(),
            ..ImportOptions::default()
        }
    }

    fn export_options(&self) -> ExportOptions {
        ExportOptions {
            exclude_fields: vec!["id".into(), "url".into()],
            filename: Some("documents".into()),
            ..ExportOptions::default()
        }
    }
}

impl RowHooks for DocumentProfile {
    fn transform(&self, mut raw: Record) -> Record {
        let tags = match raw.get("tags") {
            Some(Value::String(s)) if !s.trim().is_empty() => Value::Array(
                s.split(';').map(|t| Value::String(t.trim().to_string())).collect(),
            ),
            Some(Value::Array(tags)) => Value::Array(tags.clone()),
            _ => Value::Array(Vec::new()),
        };
        raw.insert("tags".into(), tags);

        if field_is_empty(&raw, "uploadedAt") {
            raw.insert("uploadedAt".into(), Value::String(Utc::now().to_rfc3339()));
        }
        if field_is_empty(&raw, "uploadedBy") {
            raw.insert("uploadedBy".into(), Value::String("CSV Import".into()));
        }
        if field_is_empty(&raw, "size") {
            raw.insert("size".into(), Value::String("0 KB".into()));
        }
        raw
    }

    fn transform_export(&self, records: Vec<Record>) -> Vec<Record> {
        records
            .into_iter()
            .map(|mut record| {
                let joined = match record.get("tags") {
                    Some(Value::Array(tags)) => Some(
                        tags.iter()
                            .map(|t| match t {
                                Value::String(s) => s.clone(),
                                other => other.to_string(),
                            })
                            .collect::<Vec<String>>()
                            .join(";"),
                    ),
                    _ => None,
                };
                if let Some(joined) = joined {
                    record.insert("tags".into(), Value::String(joined));
                }
                record
            })
            .collect()
    }
}
