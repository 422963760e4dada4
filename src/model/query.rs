//! Query types: the validated query and its derived search terms.
//!
//! A raw query string is derived into [`SearchTerms`] on every evaluation.
//! Matching is conjunctive, case-insensitive substring containment.

use std::fmt;

// ===== SearchQuery =====

/// Validated search query. Never empty.
/// Smart constructor enforces non-empty invariant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Smart constructor: validates query is non-empty.
    /// Returns None if query is empty or whitespace-only.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let s = raw.into();
        if s.trim().is_empty() {
            None
        } else {
            Some(Self(s))
        }
    }

    /// The raw query text, whitespace included.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Terms derived from this query. Never empty.
    pub fn terms(&self) -> SearchTerms {
        SearchTerms::parse(&self.0)
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ===== SearchTerms =====

/// Lower-cased, non-empty, whitespace-separated tokens of a query.
///
/// An empty term set matches every entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchTerms(Vec<String>);

impl SearchTerms {
    /// Split `raw` on Unicode whitespace, dropping empty tokens and
    /// case-folding the rest.
    pub fn parse(raw: &str) -> Self {
        Self(raw.split_whitespace().map(str::to_lowercase).collect())
    }

    /// True if there are no terms.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Terms in query order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// True iff `entry` contains every term, ignoring case.
    ///
    /// Stops at the first term that is missing.
    pub fn matches(&self, entry: &str) -> bool {
        if self.0.is_empty() {
            return true;
        }
        let entry_lower = entry.to_lowercase();
        self.0.iter().all(|term| entry_lower.contains(term.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== SearchQuery =====

    #[test]
    fn search_query_rejects_empty_and_whitespace() {
        assert!(SearchQuery::new("").is_none());
        assert!(SearchQuery::new("   ").is_none());
        assert!(SearchQuery::new("\t\n").is_none());
    }

    #[test]
    fn search_query_preserves_raw_text() {
        let query = SearchQuery::new("  To be  ").expect("valid query");
        assert_eq!(query.as_str(), "  To be  ");
        assert_eq!(query.to_string(), "  To be  ");
    }

    #[test]
    fn search_query_terms_are_never_empty() {
        let query = SearchQuery::new(" x ").expect("valid query");
        assert_eq!(query.terms().len(), 1);
    }

    // ===== SearchTerms::parse =====

    #[test]
    fn parse_splits_on_runs_of_whitespace() {
        let terms = SearchTerms::parse("  to   be\tor ");
        assert_eq!(terms.iter().collect::<Vec<_>>(), vec!["to", "be", "or"]);
    }

    #[test]
    fn parse_lowercases_terms() {
        let terms = SearchTerms::parse("Romeo JULIET");
        assert_eq!(terms.iter().collect::<Vec<_>>(), vec!["romeo", "juliet"]);
    }

    #[test]
    fn parse_handles_unicode_whitespace() {
        // U+3000 ideographic space and U+00A0 no-break space
        let terms = SearchTerms::parse("die\u{3000}once\u{00A0}man");
        assert_eq!(terms.len(), 3);
    }

    #[test]
    fn parse_of_blank_input_is_empty() {
        assert!(SearchTerms::parse("").is_empty());
        assert!(SearchTerms::parse("  \t ").is_empty());
    }

    // ===== SearchTerms::matches =====

    #[test]
    fn empty_terms_match_everything() {
        let terms = SearchTerms::default();
        assert!(terms.matches(""));
        assert!(terms.matches("anything"));
    }

    #[test]
    fn matches_is_case_insensitive() {
        let terms = SearchTerms::parse("ROMEO");
        assert!(terms.matches("‘Romeo, Romeo! wherefore art thou Romeo?’"));
    }

    #[test]
    fn matches_requires_every_term() {
        let terms = SearchTerms::parse("die once");
        assert!(terms.matches("‘A man can die but once.’"));
        assert!(!terms.matches("‘Now is the winter of our discontent’"));
        assert!(!SearchTerms::parse("die juliet").matches("‘A man can die but once.’"));
    }

    #[test]
    fn matches_is_substring_not_word() {
        let terms = SearchTerms::parse("any");
        assert!(terms.matches("Cowards die many times"));
    }
}
