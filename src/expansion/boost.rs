//! Boost assignment: term vectors to boost-weighted terms.
//!
//! Each term's weight is `tf * idf`, attenuated by a per-rank decay and
//! scaled by the Rocchio factor (alpha for the query vector, beta for the
//! feedback vectors). Duplicate terms across vectors are merged by summing
//! their boosts.

use ahash::AHashMap;
use log::trace;

use crate::similarity::Similarity;
use crate::term::{Term, WeightedTerm};
use crate::term_vector::TermVector;

/// Converts term vectors into boost-weighted terms.
pub struct BoostAssigner<'a> {
    similarity: &'a dyn Similarity,
    field: &'a str,
}

impl<'a> BoostAssigner<'a> {
    /// Create an assigner producing terms in `field`, weighting with
    /// `similarity`.
    pub fn new(similarity: &'a dyn Similarity, field: &'a str) -> Self {
        BoostAssigner { similarity, field }
    }

    /// Assign boosts across a ranked sequence of vectors.
    ///
    /// For the vector at rank `g` (0-based) the decay is `decay_factor * g`,
    /// and each term's boost is `factor * tf * idf * (1 - decay)`.
    ///
    /// The idf here is deliberately fed the term's raw frequency and the
    /// *current vector's* distinct-term count, not corpus document
    /// frequency and document count. Switching it to corpus stats changes
    /// every produced ranking; do not "fix" it without re-evaluating them.
    ///
    /// The output contains no two entries with an equal term: duplicates
    /// are merged by summing boosts, keeping first-appearance order.
    pub fn set_boost(
        &self,
        vectors: &[TermVector],
        factor: f32,
        decay_factor: f32,
    ) -> Vec<WeightedTerm> {
        let mut terms = Vec::new();

        for (rank, vector) in vectors.iter().enumerate() {
            let decay = decay_factor * rank as f32;

            for (text, frequency) in vector.iter() {
                let tf = frequency as f32;
                let idf = self.similarity.idf(frequency as u64, vector.len() as u64);
                let weight = tf * idf * (1.0 - decay);
                trace!("term {text}: tf={tf} idf={idf} weight={weight}");

                terms.push(WeightedTerm::new(
                    Term::new(self.field, text),
                    factor * weight,
                ));
            }
        }

        merge_duplicates(&mut terms);
        terms
    }

    /// Single-vector form: equivalent to [`set_boost`](Self::set_boost) with
    /// one vector and no decay.
    pub fn set_boost_single(&self, vector: &TermVector, factor: f32) -> Vec<WeightedTerm> {
        self.set_boost(std::slice::from_ref(vector), factor, 0.0)
    }
}

/// Merge entries with equal terms by summing their boosts, keeping the
/// first occurrence's position.
pub(crate) fn merge_duplicates(terms: &mut Vec<WeightedTerm>) {
    let mut slots: AHashMap<Term, usize> = AHashMap::with_capacity(terms.len());
    let mut merged: Vec<WeightedTerm> = Vec::with_capacity(terms.len());

    for term in terms.drain(..) {
        match slots.get(term.term()) {
            Some(&slot) => merged[slot].add_boost(term.boost()),
            None => {
                slots.insert(term.term().clone(), merged.len());
                merged.push(term);
            }
        }
    }

    *terms = merged;
}
