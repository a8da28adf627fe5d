//! Link type.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::constants::{LINK_CREATED_FIELD, LINK_DONE_FIELD, LINK_NAME_FIELD, LINK_URL_FIELD};
use crate::types::record::{field_text, is_truthy, Fields};

/// A resolved, display-ready item of a list.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// Link title
    pub name: String,
    /// Target URL
    pub url: String,
    /// Display name of the list the link was resolved through
    pub list: String,
    /// Whether the link is marked done
    pub done: bool,
    /// Creation timestamp as stored remotely
    pub created: String,
}

impl Link {
    /// Builds a link from a raw links-table record.
    ///
    /// Field names are matched exactly (`Name`, `URL`, `Done`, `Created`) and
    /// anything else is ignored. `Done` is coerced by truthiness.
    pub fn from_fields(fields: &Fields, list_name: &str) -> Self {
        Self {
            name: field_text(fields, LINK_NAME_FIELD),
            url: field_text(fields, LINK_URL_FIELD),
            list: list_name.to_string(),
            done: fields.get(LINK_DONE_FIELD).map_or(false, is_truthy),
            created: field_text(fields, LINK_CREATED_FIELD),
        }
    }

    /// Parses `created` as an RFC 3339 timestamp.
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.created).ok()
    }

    /// Renders the link as a markdown task item.
    pub fn to_markdown(&self) -> String {
        let mark = if self.done { 'x' } else { ' ' };
        format!("- [{}] [{}]({})", mark, self.name, self.url)
    }
}
