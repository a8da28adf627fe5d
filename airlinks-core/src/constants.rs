//! Constants shared across airlinks crates.

use std::time::Duration;

// ═══════════════════════════════════════════════════════════════════════════════
// IDENTIFIER PREFIXES
// ═══════════════════════════════════════════════════════════════════════════════

/// Prefix of an Airtable base identifier.
pub const BASE_ID_PREFIX: &str = "app";

/// Prefix of an Airtable table identifier.
pub const TABLE_ID_PREFIX: &str = "tbl";

/// Prefix of an Airtable record identifier.
pub const RECORD_ID_PREFIX: &str = "rec";

/// Minimum number of alphanumeric characters after the prefix.
pub const ID_MIN_BODY_LEN: usize = 9;

// ═══════════════════════════════════════════════════════════════════════════════
// REMOTE API
// ═══════════════════════════════════════════════════════════════════════════════

/// Root of the Airtable REST API.
pub const AIRTABLE_API_URL: &str = "https://api.airtable.com/v0";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Field holding a list's display name.
pub const LIST_NAME_FIELD: &str = "Name";

/// Field holding the record identifiers of a list's links.
pub const LIST_LINKS_FIELD: &str = "Links";

/// Display name used when a list record has no name.
pub const UNNAMED_LIST: &str = "Unnamed List";

/// Link record field names.
pub const LINK_NAME_FIELD: &str = "Name";
/// URL field of a link record.
pub const LINK_URL_FIELD: &str = "URL";
/// Completion flag of a link record.
pub const LINK_DONE_FIELD: &str = "Done";
/// Creation timestamp of a link record.
pub const LINK_CREATED_FIELD: &str = "Created";

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE
// ═══════════════════════════════════════════════════════════════════════════════

/// Sliding freshness window for cached link sets, in milliseconds.
pub const FRESHNESS_WINDOW_MS: u64 = 180_000;

/// Sliding freshness window for cached link sets.
pub const FRESHNESS_WINDOW: Duration = Duration::from_millis(FRESHNESS_WINDOW_MS);

// ═══════════════════════════════════════════════════════════════════════════════
// ENVIRONMENT
// ═══════════════════════════════════════════════════════════════════════════════

/// Environment variable holding the personal access token.
pub const ENV_ACCESS_TOKEN: &str = "AIRTABLE_ACCESS_TOKEN";
/// Environment variable holding the base identifier.
pub const ENV_BASE_ID: &str = "AIRTABLE_BASE_ID";
/// Environment variable holding the links table identifier.
pub const ENV_LINKS_TABLE_ID: &str = "AIRTABLE_LINKS_TABLE_ID";
/// Environment variable holding the lists table identifier.
pub const ENV_LISTS_TABLE_ID: &str = "AIRTABLE_LISTS_TABLE_ID";
