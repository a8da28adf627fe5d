//! Ways of addressing a list.

use url::Url;

use crate::error::{AirlinksError, Result};
use crate::validate::is_valid_record_id;

/// A reference to a remote list.
///
/// Both forms resolve to the same record identifier, which is also the
/// cache key, so a list fetched by URL is served from cache when later
/// requested by ID and vice versa.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListRef {
    /// Bare record identifier, e.g. `recAAAAAAAAA`.
    ByRecordId(String),
    /// Record URL, e.g. `https://airtable.com/appX/tblY/recZ`.
    ByUrl {
        /// The URL as given
        url: Url,
        /// Record identifier extracted from the path
        record_id: String,
    },
}

impl ListRef {
    /// Parses user input into a list reference.
    ///
    /// Surrounding whitespace is trimmed. Input is accepted as either a record
    /// identifier or an http(s) URL with a record identifier path segment; the
    /// last such segment wins.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if is_valid_record_id(input) {
            return Ok(ListRef::ByRecordId(input.to_string()));
        }

        let url = Url::parse(input)
            .map_err(|_| AirlinksError::InvalidIdentifier(input.to_string()))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AirlinksError::InvalidIdentifier(input.to_string()));
        }

        let record_id = url
            .path_segments()
            .and_then(|segments| segments.filter(|s| is_valid_record_id(s)).last())
            .map(str::to_string)
            .ok_or_else(|| AirlinksError::InvalidIdentifier(input.to_string()))?;

        Ok(ListRef::ByUrl { url, record_id })
    }

    /// Record identifier of the referenced list.
    pub fn record_id(&self) -> &str {
        match self {
            ListRef::ByRecordId(id) => id,
            ListRef::ByUrl { record_id, .. } => record_id,
        }
    }
}

impl std::str::FromStr for ListRef {
    type Err = AirlinksError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for ListRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListRef::ByRecordId(id) => f.write_str(id),
            ListRef::ByUrl { url, .. } => write!(f, "{}", url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_parse_record_id() {
        let list = ListRef::parse("  recAAAAAAAAA ").unwrap();
        assert_eq!(list, ListRef::ByRecordId("recAAAAAAAAA".into()));
        assert_eq!(list.record_id(), "recAAAAAAAAA");
    }

    #[test_case("https://airtable.com/appAAAAAAAAA/tblBBBBBBBBB/recCCCCCCCCC" ; "record url")]
    #[test_case("https://airtable.com/appAAAAAAAAA/tblBBBBBBBBB/viwDDDDDDDDD/recCCCCCCCCC?blocks=hide" ; "view url with query")]
    #[test_case("http://airtable.com/recCCCCCCCCC/" ; "trailing slash")]
    fn test_parse_url(input: &str) {
        let list = ListRef::parse(input).unwrap();
        assert!(matches!(list, ListRef::ByUrl { .. }));
        assert_eq!(list.record_id(), "recCCCCCCCCC");
    }

    #[test]
    fn test_last_record_segment_wins() {
        let list = ListRef::parse("https://airtable.com/recAAAAAAAAA/recBBBBBBBBB").unwrap();
        assert_eq!(list.record_id(), "recBBBBBBBBB");
    }

    #[test_case("" ; "empty")]
    #[test_case("recShort" ; "short id")]
    #[test_case("tblAAAAAAAAA" ; "table id")]
    #[test_case("https://airtable.com/appAAAAAAAAA/tblBBBBBBBBB" ; "url without record")]
    #[test_case("ftp://airtable.com/recCCCCCCCCC" ; "unsupported scheme")]
    #[test_case("https://airtable.com/?id=recCCCCCCCCC" ; "record in query only")]
    fn test_parse_rejects(input: &str) {
        assert!(matches!(
            ListRef::parse(input),
            Err(AirlinksError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_from_str_and_display() {
        let list: ListRef = "recAAAAAAAAA".parse().unwrap();
        assert_eq!(list.to_string(), "recAAAAAAAAA");
    }
}
