//! The searchable corpus.
//!
//! Entries are fixed at construction and never reordered or filtered in
//! place. Filtering always produces a new borrowed view.

use super::query::SearchTerms;

/// The compiled-in quotations.
pub const SHAKESPEARE_QUOTES: [&str; 10] = [
    "‘To be, or not to be: that is the question’",
    "‘All the world‘s a stage, and all the men and women merely players. They have their exits and their entrances; And one man in his time plays many parts.’",
    "‘Romeo, Romeo! wherefore art thou Romeo?’",
    "‘Now is the winter of our discontent’",
    "‘Is this a dagger which I see before me, the handle toward my hand?’",
    "‘Some are born great, some achieve greatness, and some have greatness thrust upon them.’",
    "‘Cowards die many times before their deaths; the valiant never taste of death but once.’",
    "‘Full fathom five thy father lies, of his bones are coral made. Those are pearls that were his eyes. Nothing of him that doth fade, but doth suffer a sea-change into something rich and strange.’",
    "‘A man can die but once.’",
    "‘How sharper than a serpent’s tooth it is to have a thankless child!’",
];

/// Ordered, immutable collection of text entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    entries: Box<[String]>,
}

impl Corpus {
    /// Builds a corpus from `entries`, keeping their order.
    ///
    /// ```
    /// use qsearch::{Corpus, SearchTerms};
    ///
    /// let corpus = Corpus::new(["Alpha beta", "gamma"]);
    /// assert_eq!(corpus.len(), 2);
    /// assert_eq!(corpus.filter(&SearchTerms::parse("BETA")), vec!["Alpha beta"]);
    /// ```
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// The ten built-in Shakespeare quotations.
    pub fn shakespeare() -> Self {
        Self::new(SHAKESPEARE_QUOTES)
    }

    /// All entries in corpus order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the corpus has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries matching every term, in corpus order.
    pub fn filter(&self, terms: &SearchTerms) -> Vec<&str> {
        self.entries
            .iter()
            .map(String::as_str)
            .filter(|entry| terms.matches(entry))
            .collect()
    }

    /// Number of entries matching every term.
    pub fn count(&self, terms: &SearchTerms) -> usize {
        self.entries.iter().filter(|entry| terms.matches(entry)).count()
    }
}

impl Default for Corpus {
    fn default() -> Self {
        Self::shakespeare()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shakespeare_corpus_has_ten_entries() {
        let corpus = Corpus::shakespeare();
        assert_eq!(corpus.len(), 10);
        assert!(!corpus.is_empty());
    }

    #[test]
    fn filter_with_no_terms_returns_everything_in_order() {
        let corpus = Corpus::shakespeare();
        let all = corpus.filter(&SearchTerms::default());
        assert_eq!(all, SHAKESPEARE_QUOTES.to_vec());
    }

    #[test]
    fn filter_preserves_corpus_order() {
        let corpus = Corpus::new(["beta one", "alpha", "beta two"]);
        assert_eq!(
            corpus.filter(&SearchTerms::parse("beta")),
            vec!["beta one", "beta two"]
        );
    }

    #[test]
    fn filter_does_not_touch_corpus() {
        let corpus = Corpus::shakespeare();
        let before = corpus.clone();
        let _ = corpus.filter(&SearchTerms::parse("death"));
        assert_eq!(corpus, before);
    }

    #[test]
    fn count_agrees_with_filter() {
        let corpus = Corpus::shakespeare();
        for raw in ["the", "die once", "man", "romeo juliet", "a"] {
            let terms = SearchTerms::parse(raw);
            assert_eq!(corpus.count(&terms), corpus.filter(&terms).len(), "query {raw:?}");
        }
    }

    #[test]
    fn empty_corpus_filters_to_nothing() {
        let corpus = Corpus::new(Vec::<String>::new());
        assert!(corpus.is_empty());
        assert!(corpus.filter(&SearchTerms::default()).is_empty());
        assert_eq!(corpus.count(&SearchTerms::parse("x")), 0);
    }
}
