//! Core term types for query expansion.
//!
//! A [`Term`] identifies a unit of indexed text by its `(field, text)` pair;
//! two terms are equal iff both components match. A [`WeightedTerm`] pairs a
//! term with a floating boost. Boosts are additive: whenever the same term
//! recurs during merging or combination, the boosts are summed.
//!
//! # Examples
//!
//! ```
//! use rocchio::term::{Term, WeightedTerm};
//!
//! let term = Term::new("contents", "car");
//! assert_eq!(term.field(), "contents");
//! assert_eq!(term.text(), "car");
//!
//! let mut weighted = WeightedTerm::new(term, 1.5);
//! weighted.add_boost(0.5);
//! assert_eq!(weighted.boost(), 2.0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A term identified by its field name and text.
///
/// Equality and hashing cover both components, so the same text in two
/// different fields is two distinct terms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    /// The field the term was indexed under.
    field: String,
    /// The term text.
    text: String,
}

impl Term {
    /// Create a new term.
    pub fn new<F, T>(field: F, text: T) -> Self
    where
        F: Into<String>,
        T: Into<String>,
    {
        Term {
            field: field.into(),
            text: text.into(),
        }
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Get the term text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.text)
    }
}

/// A term plus a floating boost.
///
/// The boost expresses how strongly the term should influence relevance
/// scoring in the expanded query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedTerm {
    term: Term,
    boost: f32,
}

impl WeightedTerm {
    /// Create a new weighted term.
    pub fn new(term: Term, boost: f32) -> Self {
        WeightedTerm { term, boost }
    }

    /// Get the term.
    pub fn term(&self) -> &Term {
        &self.term
    }

    /// Get the boost factor.
    pub fn boost(&self) -> f32 {
        self.boost
    }

    /// Set the boost factor.
    pub fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    /// Add to the boost factor (merge rule for duplicate terms).
    pub fn add_boost(&mut self, delta: f32) {
        self.boost += delta;
    }
}

impl fmt::Display for WeightedTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}^{}", self.term, self.boost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_equality() {
        let a = Term::new("contents", "car");
        let b = Term::new("contents", "car");
        let c = Term::new("title", "car");
        let d = Term::new("contents", "auto");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_term_display() {
        let term = Term::new("contents", "car");
        assert_eq!(term.to_string(), "contents:car");
    }

    #[test]
    fn test_weighted_term_boost() {
        let mut weighted = WeightedTerm::new(Term::new("contents", "car"), 1.0);
        assert_eq!(weighted.boost(), 1.0);

        weighted.add_boost(2.0);
        assert_eq!(weighted.boost(), 3.0);

        weighted.set_boost(0.5);
        assert_eq!(weighted.boost(), 0.5);
    }

    #[test]
    fn test_weighted_term_display() {
        let weighted = WeightedTerm::new(Term::new("contents", "car"), 2.5);
        assert_eq!(weighted.to_string(), "contents:car^2.5");
    }
}
