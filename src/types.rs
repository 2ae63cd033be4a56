use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

pub type CollectionName = String;
pub type FieldName = String;

/// One logical row of tabular data: field name to JSON value.
/// The field set is driven by the input header and the caller's
/// configuration, not by a fixed schema.
pub type Record = Map<String, Value>;

/// Store-assigned record identifier.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(pub Uuid);

impl RecordId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// String form of a field value, as used for CSV cells and duplicate keys.
/// Nested arrays/objects serialize as JSON; null renders empty.
#[must_use]
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

/// True when the field is absent, null, or blank.
#[must_use]
pub fn field_is_empty(record: &Record, field: &str) -> bool {
    match record.get(field) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Lower-cased duplicate-detection key of a field value; `None` when the
/// field is effectively empty (such rows are never dedup-tracked).
#[must_use]
pub fn unique_key(record: &Record, field: &str) -> Option<String> {
    let value = record.get(field)?;
    let key = value_to_string(value).trim().to_lowercase();
    if key.is_empty() { None } else { Some(key) }
}
