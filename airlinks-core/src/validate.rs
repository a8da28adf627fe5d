//! Structural validation of Airtable identifiers.
//!
//! An identifier is a three-letter role prefix followed by at least nine ASCII
//! alphanumeric characters. Matching is anchored at both ends, so whitespace,
//! path segments and query strings are rejected.

use once_cell::sync::Lazy;
use regex::Regex;

static BASE_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^app[a-zA-Z0-9]{9,}$").expect("invalid base ID regex"));

static TABLE_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^tbl[a-zA-Z0-9]{9,}$").expect("invalid table ID regex"));

static RECORD_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^rec[a-zA-Z0-9]{9,}$").expect("invalid record ID regex"));

/// Returns true if `s` is a record identifier (`rec` + 9 or more alphanumerics).
pub fn is_valid_record_id(s: &str) -> bool {
    RECORD_ID_REGEX.is_match(s)
}

/// Returns true if `s` is a table identifier (`tbl` + 9 or more alphanumerics).
pub fn is_valid_table_id(s: &str) -> bool {
    TABLE_ID_REGEX.is_match(s)
}

/// Returns true if `s` is a base identifier (`app` + 9 or more alphanumerics).
pub fn is_valid_base_id(s: &str) -> bool {
    BASE_ID_REGEX.is_match(s)
}

/// Kind of identifier a string matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdKind {
    /// `app...`
    Base,
    /// `tbl...`
    Table,
    /// `rec...`
    Record,
}

impl IdKind {
    /// Classifies `s`, or returns `None` if it matches no identifier format.
    pub fn classify(s: &str) -> Option<Self> {
        if is_valid_record_id(s) {
            Some(IdKind::Record)
        } else if is_valid_table_id(s) {
            Some(IdKind::Table)
        } else if is_valid_base_id(s) {
            Some(IdKind::Base)
        } else {
            None
        }
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            IdKind::Base => "base",
            IdKind::Table => "table",
            IdKind::Record => "record",
        }
    }
}

impl std::fmt::Display for IdKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
