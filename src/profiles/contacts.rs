use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::Profile;
use crate::export::ExportOptions;
use crate::hooks::RowHooks;
use crate::import::ImportOptions;
use crate::types::{Record, value_to_string};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

const VALID_STATUSES: [&str; 4] = ["lead", "prospect", "customer", "inactive"];

/// CRM contacts: unique by e-mail, status constrained to the lifecycle set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactProfile;

impl Profile for ContactProfile {
    fn import_options(&self) -> ImportOptions {
        ImportOptions {
            collection: "contacts".into(),
            required_fields: vec!["name".into(), "email".into(), "status".into()],
            unique_field: "email".into(),
            ..ImportOptions::default()
        }
    }

    fn export_options(&self) -> ExportOptions {
        ExportOptions {
            exclude_fields: vec!["id".into(), "custom_fields".into()],
            filename: Some("contacts".into()),
            ..ExportOptions::default()
        }
    }
}

impl RowHooks for ContactProfile {
    fn transform(&self, mut raw: Record) -> Record {
        // Unknown statuses degrade to "lead" rather than failing the row.
        let status = raw.get("status").map(value_to_string).unwrap_or_default();
        if !VALID_STATUSES.contains(&status.to_lowercase().as_str()) {
            raw.insert("status".into(), Value::String("lead".into()));
        }
        raw
    }

    fn validate(&self, record: &Record, _row: usize) -> Result<(), String> {
        let email = record.get("email").map(value_to_string).unwrap_or_default();
        if !EMAIL_RE.is_match(&email) {
            return Err("Invalid email format".to_string());
        }
        Ok(())
    }

    fn transform_export(&self, records: Vec<Record>) -> Vec<Record> {
        // custom_fields objects flatten into custom_<key> columns.
        records
            .into_iter()
            .map(|mut record| {
                if let Some(Value::Object(custom)) = record.remove("custom_fields") {
                    for (key, value) in custom {
                        record.insert(format!("custom_{key}"), value);
                    }
                }
                record
            })
            .collect()
    }
}
