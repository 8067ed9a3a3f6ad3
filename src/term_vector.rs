//! Term-frequency vectors extracted from documents and query strings.
//!
//! A [`TermVector`] is an ordered sequence of `(term text, raw frequency)`
//! pairs for one document or one query. Order is first-appearance order of
//! the term in the analyzed text; it carries no meaning beyond stable
//! processing downstream.
//!
//! # Examples
//!
//! ```
//! use rocchio::analysis::SimpleAnalyzer;
//! use rocchio::term_vector::TermVector;
//!
//! let analyzer = SimpleAnalyzer::new();
//! let vector = TermVector::from_text("car auto car", &analyzer).unwrap();
//!
//! assert_eq!(vector.len(), 2);
//! assert_eq!(vector.terms(), &["car", "auto"]);
//! assert_eq!(vector.frequencies(), &[2, 1]);
//! ```

use ahash::AHashMap;

use crate::analysis::Analyzer;
use crate::error::Result;
use crate::index::StoredDocument;

/// A weighted term-frequency vector in first-appearance order.
///
/// Terms and frequencies are parallel arrays; `len()` is the number of
/// distinct terms, not the token count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    terms: Vec<String>,
    frequencies: Vec<u32>,
}

impl TermVector {
    /// Build a term vector by analyzing `text`.
    pub fn from_text(text: &str, analyzer: &dyn Analyzer) -> Result<TermVector> {
        let tokens = analyzer.analyze(text)?;

        let mut slots: AHashMap<String, usize> = AHashMap::with_capacity(tokens.len());
        let mut terms = Vec::new();
        let mut frequencies: Vec<u32> = Vec::new();

        for token in tokens {
            match slots.get(&token) {
                Some(&slot) => frequencies[slot] += 1,
                None => {
                    slots.insert(token.clone(), terms.len());
                    terms.push(token);
                    frequencies.push(1);
                }
            }
        }

        Ok(TermVector { terms, frequencies })
    }

    /// Build a term vector from all stored values of a document field.
    ///
    /// The values are concatenated with a separating space before analysis.
    /// A document with no values for the field, or whose text analyzes to
    /// nothing, contributes no vector (`None`); callers skip it rather than
    /// fail.
    pub fn from_document(
        doc: &StoredDocument,
        field: &str,
        analyzer: &dyn Analyzer,
    ) -> Result<Option<TermVector>> {
        let values = doc.values(field);
        if values.is_empty() {
            return Ok(None);
        }

        let vector = TermVector::from_text(&values.join(" "), analyzer)?;
        if vector.is_empty() {
            return Ok(None);
        }
        Ok(Some(vector))
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the vector holds no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Distinct terms in first-appearance order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Raw frequencies parallel to [`terms`](Self::terms).
    pub fn frequencies(&self) -> &[u32] {
        &self.frequencies
    }

    /// Iterate over `(term, frequency)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.terms
            .iter()
            .map(String::as_str)
            .zip(self.frequencies.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::SimpleAnalyzer;
    use crate::index::DEFAULT_TEXT_FIELD;

    #[test]
    fn test_from_text_counts_and_order() {
        let analyzer = SimpleAnalyzer::new();
        let vector = TermVector::from_text("wheel car wheel wheel auto car", &analyzer).unwrap();

        assert_eq!(vector.terms(), &["wheel", "car", "auto"]);
        assert_eq!(vector.frequencies(), &[3, 2, 1]);
        assert_eq!(vector.len(), 3);
    }

    #[test]
    fn test_from_text_empty() {
        let analyzer = SimpleAnalyzer::new();
        let vector = TermVector::from_text("", &analyzer).unwrap();
        assert!(vector.is_empty());
    }

    #[test]
    fn test_from_document_concatenates_values() {
        let analyzer = SimpleAnalyzer::new();
        let doc = StoredDocument::new("d1")
            .with_value(DEFAULT_TEXT_FIELD, "car auto")
            .with_value(DEFAULT_TEXT_FIELD, "car wheel");

        let vector = TermVector::from_document(&doc, DEFAULT_TEXT_FIELD, &analyzer)
            .unwrap()
            .unwrap();
        assert_eq!(vector.terms(), &["car", "auto", "wheel"]);
        assert_eq!(vector.frequencies(), &[2, 1, 1]);
    }

    #[test]
    fn test_from_document_without_field_is_skipped() {
        let analyzer = SimpleAnalyzer::new();
        let doc = StoredDocument::new("d1").with_value("title", "no body");

        let vector = TermVector::from_document(&doc, DEFAULT_TEXT_FIELD, &analyzer).unwrap();
        assert!(vector.is_none());
    }

    #[test]
    fn test_from_document_empty_text_is_skipped() {
        let analyzer = SimpleAnalyzer::new();
        let doc = StoredDocument::new("d1").with_value(DEFAULT_TEXT_FIELD, "  ...  ");

        let vector = TermVector::from_document(&doc, DEFAULT_TEXT_FIELD, &analyzer).unwrap();
        assert!(vector.is_none());
    }

    #[test]
    fn test_iter_pairs() {
        let analyzer = SimpleAnalyzer::new();
        let vector = TermVector::from_text("a b a", &analyzer).unwrap();
        let pairs: Vec<_> = vector.iter().collect();
        assert_eq!(pairs, vec![("a", 2), ("b", 1)]);
    }
}
