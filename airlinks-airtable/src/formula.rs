//! Filter formulas for the links query.

/// Builds a formula matching records whose own identifier is in `ids`.
///
/// Identifiers are de-duplicated in first-seen order, so repeated entries
/// neither widen the query nor duplicate results. An empty input yields a
/// formula that matches nothing.
pub fn record_id_filter(ids: &[String]) -> String {
    let mut seen = std::collections::HashSet::new();
    let clauses: Vec<String> = ids
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .map(|id| format!("RECORD_ID()='{}'", escape(id)))
        .collect();

    match clauses.len() {
        0 => "FALSE()".to_string(),
        1 => clauses.into_iter().next().unwrap_or_default(),
        _ => format!("OR({})", clauses.join(",")),
    }
}

/// Escapes a value for a single-quoted formula string literal.
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_id() {
        assert_eq!(
            record_id_filter(&ids(&["recBBBBBBBBB"])),
            "RECORD_ID()='recBBBBBBBBB'"
        );
    }

    #[test]
    fn test_any_of() {
        assert_eq!(
            record_id_filter(&ids(&["recBBBBBBBBB", "recCCCCCCCCC"])),
            "OR(RECORD_ID()='recBBBBBBBBB',RECORD_ID()='recCCCCCCCCC')"
        );
    }

    #[test]
    fn test_duplicates_removed() {
        assert_eq!(
            record_id_filter(&ids(&["recBBBBBBBBB", "recCCCCCCCCC", "recBBBBBBBBB"])),
            "OR(RECORD_ID()='recBBBBBBBBB',RECORD_ID()='recCCCCCCCCC')"
        );
    }

    #[test]
    fn test_empty_matches_nothing() {
        assert_eq!(record_id_filter(&[]), "FALSE()");
    }

    #[test]
    fn test_quotes_escaped() {
        assert_eq!(
            record_id_filter(&ids(&["rec' OR TRUE() OR '"])),
            r"RECORD_ID()='rec\' OR TRUE() OR \''"
        );
    }
}
