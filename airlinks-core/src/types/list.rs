//! List type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{LIST_LINKS_FIELD, LIST_NAME_FIELD, UNNAMED_LIST};
use crate::types::record::Fields;

/// A remote list and the record identifiers of the links it declares.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    /// Display name
    pub name: String,
    /// Record identifier of the list
    pub id: String,
    /// Link record identifiers, in declared order
    pub links: Vec<String>,
}

impl List {
    /// Builds a list from the fields of a lists-table record.
    ///
    /// A missing or empty `Name` falls back to "Unnamed List". A missing
    /// `Links` field yields no links; non-string entries are skipped.
    pub fn from_fields(id: impl Into<String>, fields: &Fields) -> Self {
        let name = fields
            .get(LIST_NAME_FIELD)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNNAMED_LIST)
            .to_string();

        let links = fields
            .get(LIST_LINKS_FIELD)
            .and_then(Value::as_array)
            .map(|ids| {
                ids.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            name,
            id: id.into(),
            links,
        }
    }

    /// Returns true if the list declares no links.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
