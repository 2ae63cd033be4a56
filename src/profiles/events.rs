use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde_json::Value;

use super::Profile;
use crate::export::ExportOptions;
use crate::hooks::RowHooks;
use crate::import::ImportOptions;
use crate::types::{Record, field_is_empty, value_to_string};

/// Calendar events: unique by title, timestamps validated up front.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventProfile;

fn parse_when(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| ndt.and_utc())
}

impl Profile for EventProfile {
    fn import_options(&self) -> ImportOptions {
        ImportOptions {
            collection: "events".into(),
            required_fields: vec!["title".into(), "start".into()],
            // Title alone; title+start would be stronger but matches what
            // calendars deduplicate on today.
            unique_field: "title".into(),
            ..ImportOptions::default()
        }
    }

    fn export_options(&self) -> ExportOptions {
        ExportOptions {
            exclude_fields: vec!["id".into()],
            filename: Some("events".into()),
            ..ExportOptions::default()
        }
    }
}

impl RowHooks for EventProfile {
    fn transform(&self, mut raw: Record) -> Record {
        if field_is_empty(&raw, "end")
            && let Some(start) = raw.get("start").map(value_to_string)
            && let Some(start) = parse_when(&start)
        {
            let end = start + Duration::hours(1);
            raw.insert("end".into(), Value::String(end.to_rfc3339()));
        }
        let all_day = raw.get("allDay").map(value_to_string).unwrap_or_default();
        raw.insert("allDay".into(), Value::Bool(all_day.eq_ignore_ascii_case("true")));
        if field_is_empty(&raw, "color") {
            raw.insert("color".into(), Value::String("blue".into()));
        }
        raw
    }

    fn validate(&self, record: &Record, _row: usize) -> Result<(), String> {
        for field in ["start", "end"] {
            let text = record.get(field).map(value_to_string).unwrap_or_default();
            if !text.is_empty() && parse_when(&text).is_none() {
                return Err("Invalid date format".to_string());
            }
        }
        Ok(())
    }
}
