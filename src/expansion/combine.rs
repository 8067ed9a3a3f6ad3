//! Rocchio's linear combination of query and feedback term sets.

use ahash::AHashMap;

use crate::term::{Term, WeightedTerm};

/// Combine query terms with feedback-document terms.
///
/// The result starts as a copy of `docs_terms`; each query term either adds
/// its boost to an equal existing term or is appended unchanged. The output
/// is the union of both term sets with additive merge on collision, so the
/// total boost mass per term is independent of input ordering.
pub fn combine(query_terms: &[WeightedTerm], docs_terms: &[WeightedTerm]) -> Vec<WeightedTerm> {
    let mut terms: Vec<WeightedTerm> = docs_terms.to_vec();
    let mut slots: AHashMap<Term, usize> = AHashMap::with_capacity(terms.len());
    for (i, term) in terms.iter().enumerate() {
        slots.insert(term.term().clone(), i);
    }

    for query_term in query_terms {
        match slots.get(query_term.term()) {
            Some(&slot) => terms[slot].add_boost(query_term.boost()),
            None => {
                slots.insert(query_term.term().clone(), terms.len());
                terms.push(query_term.clone());
            }
        }
    }

    terms
}
