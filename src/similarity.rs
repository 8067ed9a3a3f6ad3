//! Similarity model seam.
//!
//! The expansion engine and the diagnostic scorers borrow their arithmetic
//! from an external similarity model through the [`Similarity`] trait. The
//! bundled [`ClassicSimilarity`] implements the classic tf-idf formulas and
//! is the default used by the tests; a caller that scores with a different
//! model supplies its own implementation so that expansion weights and
//! retrieval scores agree.
//!
//! # Examples
//!
//! ```
//! use rocchio::similarity::{ClassicSimilarity, Similarity};
//!
//! let similarity = ClassicSimilarity::new();
//! assert!(similarity.idf(10, 1000) > similarity.idf(100, 1000));
//! assert_eq!(similarity.coord(2, 4), 0.5);
//! ```

/// Trait for similarity models supplying relevance-weighting arithmetic.
pub trait Similarity: Send + Sync {
    /// Inverse document frequency for a term occurring in `doc_freq` of
    /// `doc_count` documents.
    fn idf(&self, doc_freq: u64, doc_count: u64) -> f32;

    /// Term-frequency normalization of a raw frequency.
    fn tf(&self, freq: f32) -> f32;

    /// Length normalization factor for a field containing `field_length`
    /// terms.
    fn length_norm(&self, field_length: usize) -> f32;

    /// Coordination factor: how much of the query overlaps the document.
    fn coord(&self, overlap: usize, max_overlap: usize) -> f32;

    /// Get the name of this similarity model.
    fn name(&self) -> &'static str;
}

/// Classic tf-idf similarity.
///
/// - `idf(df, n) = 1 + ln(n / (df + 1))`
/// - `tf(f) = sqrt(f)`
/// - `length_norm(l) = 1 / sqrt(l)`
/// - `coord(o, m) = o / m`
#[derive(Clone, Debug, Default)]
pub struct ClassicSimilarity;

impl ClassicSimilarity {
    /// Create a new classic similarity.
    pub fn new() -> Self {
        ClassicSimilarity
    }
}

impl Similarity for ClassicSimilarity {
    fn idf(&self, doc_freq: u64, doc_count: u64) -> f32 {
        1.0 + (doc_count as f32 / (doc_freq as f32 + 1.0)).ln()
    }

    fn tf(&self, freq: f32) -> f32 {
        freq.sqrt()
    }

    fn length_norm(&self, field_length: usize) -> f32 {
        if field_length == 0 {
            0.0
        } else {
            1.0 / (field_length as f32).sqrt()
        }
    }

    fn coord(&self, overlap: usize, max_overlap: usize) -> f32 {
        if max_overlap == 0 {
            0.0
        } else {
            overlap as f32 / max_overlap as f32
        }
    }

    fn name(&self) -> &'static str {
        "classic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_idf_decreases_with_doc_freq() {
        let similarity = ClassicSimilarity::new();
        let rare = similarity.idf(1, 1000);
        let common = similarity.idf(500, 1000);
        assert!(rare > common);
    }

    #[test]
    fn test_classic_tf_is_sqrt() {
        let similarity = ClassicSimilarity::new();
        assert_eq!(similarity.tf(4.0), 2.0);
        assert_eq!(similarity.tf(0.0), 0.0);
    }

    #[test]
    fn test_classic_length_norm() {
        let similarity = ClassicSimilarity::new();
        assert_eq!(similarity.length_norm(4), 0.5);
        assert_eq!(similarity.length_norm(0), 0.0);
    }

    #[test]
    fn test_classic_coord() {
        let similarity = ClassicSimilarity::new();
        assert_eq!(similarity.coord(3, 4), 0.75);
        assert_eq!(similarity.coord(0, 0), 0.0);
    }
}
