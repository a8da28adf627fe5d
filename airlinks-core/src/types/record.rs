//! Raw record shapes returned by the remote store.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field map of a remote record.
pub type Fields = serde_json::Map<String, Value>;

/// Body of a single-record read: `{ id, fields: {...} }`.
///
/// Both members are optional because the remote store answers unknown or
/// inaccessible records with bodies that lack them.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RecordResponse {
    /// Record identifier
    #[serde(default)]
    pub id: Option<String>,
    /// Record fields
    #[serde(default)]
    pub fields: Option<Fields>,
}

/// A record known to carry fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Record identifier
    pub id: String,
    /// Record fields
    pub fields: Fields,
}

impl RecordResponse {
    /// Converts into a [`Record`], or `None` when the body has no fields.
    pub fn into_record(self, fallback_id: &str) -> Option<Record> {
        let fields = self.fields?;
        Some(Record {
            id: self.id.unwrap_or_else(|| fallback_id.to_string()),
            fields,
        })
    }
}

/// One record inside a filtered query response.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawRecord {
    /// Record identifier
    #[serde(default)]
    pub id: Option<String>,
    /// Record fields
    #[serde(default)]
    pub fields: Fields,
}

/// Body of a filtered query: `{ records: [...], offset? }`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ListRecordsResponse {
    /// Matching records (first page only)
    #[serde(default)]
    pub records: Vec<RawRecord>,
    /// Cursor for the next page, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
}

/// JavaScript-style truthiness of a JSON value.
///
/// `null`, `false`, `0`, `NaN` and `""` are falsy; everything else,
/// including empty arrays and objects, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Reads a field as text. Absent and `null` fields become the empty string.
pub fn field_text(fields: &Fields, key: &str) -> String {
    match fields.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
