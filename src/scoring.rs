//! Diagnostic scorers for evaluating expanded queries.
//!
//! These are independent of expansion itself: after the expanded query has
//! been searched, the batch evaluation output reports per-document and
//! per-term statistics (coordination level, normalized tf/idf, normalized
//! boost) computed here against the index and similarity model.
//!
//! The normalizing maxima (`idf_norm`) are memoized per scorer instance,
//! keyed by a content hash of the term set - never by reference identity -
//! so a changed term set always recomputes. One scorer is typically created
//! per evaluation run and dropped with it.

use std::hash::{Hash, Hasher};

use ahash::AHasher;
use parking_lot::Mutex;

use crate::error::Result;
use crate::index::SearchReader;
use crate::similarity::Similarity;
use crate::term::{Term, WeightedTerm};

/// Computes evaluation statistics for ranked documents and expansion terms.
pub struct DiagnosticScorer<'a> {
    reader: &'a dyn SearchReader,
    similarity: &'a dyn Similarity,
    /// Memoized `(term-set content hash, max idf)` of the last term set seen.
    max_idf_memo: Mutex<Option<(u64, f32)>>,
}

impl<'a> DiagnosticScorer<'a> {
    /// Create a scorer over the given reader and similarity model.
    pub fn new(reader: &'a dyn SearchReader, similarity: &'a dyn Similarity) -> Self {
        DiagnosticScorer {
            reader,
            similarity,
            max_idf_memo: Mutex::new(None),
        }
    }

    /// Raw frequency of `term` within the document's stored term vector
    /// (0 if absent).
    pub fn raw_tf(&self, term: &Term, doc_id: u64) -> Result<f32> {
        Ok(self.reader.term_frequency(doc_id, term)? as f32)
    }

    /// Corpus idf of `term`.
    pub fn idf(&self, term: &Term) -> Result<f32> {
        let doc_freq = self.reader.doc_frequency(term)?;
        Ok(self.similarity.idf(doc_freq, self.reader.doc_count()))
    }

    /// Idf of `term` normalized by the maximum idf over `terms`.
    ///
    /// The maximum is memoized; a different term set (by content) replaces
    /// the memo.
    pub fn idf_norm(&self, term: &Term, terms: &[WeightedTerm]) -> Result<f32> {
        let max_idf = self.max_idf(terms)?;
        if max_idf <= 0.0 {
            return Ok(0.0);
        }
        Ok(self.idf(term)? / max_idf)
    }

    /// Similarity-normalized tf of `term` in the document, scaled by the
    /// length norm of the document's field.
    pub fn tf_norm(&self, term: &Term, doc_id: u64) -> Result<f32> {
        let tf = self.similarity.tf(self.raw_tf(term, doc_id)?);
        let field_length = self.reader.field_length(doc_id, term.field())?;
        Ok(tf * self.similarity.length_norm(field_length))
    }

    /// Coordination level: fraction-of-overlap boost for the document over
    /// the query terms. A failed frequency lookup counts as no overlap.
    pub fn coord(&self, terms: &[WeightedTerm], doc_id: u64) -> Result<f32> {
        let overlap = terms
            .iter()
            .filter(|t| self.raw_tf(t.term(), doc_id).unwrap_or(0.0) > 0.0)
            .count();
        Ok(self.similarity.coord(overlap, terms.len()))
    }

    /// Boost of `term` normalized by the maximum boost over `terms`.
    pub fn boost_norm(&self, term: &WeightedTerm, terms: &[WeightedTerm]) -> f32 {
        let max = terms.iter().map(WeightedTerm::boost).fold(0.0, f32::max);
        if max <= 0.0 {
            return 0.0;
        }
        term.boost() / max
    }

    fn max_idf(&self, terms: &[WeightedTerm]) -> Result<f32> {
        let hash = term_set_hash(terms);

        if let Some((cached_hash, cached_max)) = *self.max_idf_memo.lock() {
            if cached_hash == hash {
                return Ok(cached_max);
            }
        }

        let mut max_idf: f32 = 0.0;
        for term in terms {
            max_idf = max_idf.max(self.idf(term.term())?);
        }
        *self.max_idf_memo.lock() = Some((hash, max_idf));
        Ok(max_idf)
    }
}

/// Content hash of a term set: the ordered `(field, text)` pairs, boosts
/// excluded (the max idf does not depend on them).
fn term_set_hash(terms: &[WeightedTerm]) -> u64 {
    let mut hasher = AHasher::default();
    for term in terms {
        term.term().hash(&mut hasher);
    }
    hasher.finish()
}
