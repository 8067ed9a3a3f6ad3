//! Text analysis seam for query expansion.
//!
//! Tokenization is an external concern: the expansion engine consumes an
//! [`Analyzer`] and never inspects text itself. The bundled
//! [`SimpleAnalyzer`] splits on Unicode word boundaries (UAX #29) and
//! lowercases, which is enough to run the crate stand-alone and in tests;
//! production callers plug in the analyzer that built their index.
//!
//! # Examples
//!
//! ```
//! use rocchio::analysis::{Analyzer, SimpleAnalyzer};
//!
//! let analyzer = SimpleAnalyzer::new();
//! let tokens = analyzer.analyze("Hello, world!").unwrap();
//! assert_eq!(tokens, vec!["hello", "world"]);
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::error::Result;

/// Trait for analyzers that convert text into a term sequence.
///
/// Implementations must be `Send + Sync` so one analyzer can serve
/// expansions across threads. The produced terms should be in the same
/// normalized form the search index stores (e.g. lowercased), otherwise
/// feedback statistics will not line up with the index.
pub trait Analyzer: Send + Sync {
    /// Tokenize the given text into terms, in input order.
    fn analyze(&self, text: &str) -> Result<Vec<String>>;

    /// Get the name of this analyzer.
    fn name(&self) -> &'static str;
}

/// A minimal analyzer splitting on Unicode word boundaries and lowercasing.
///
/// Uses the Unicode Text Segmentation algorithm (UAX #29), which filters out
/// punctuation and whitespace and handles international text.
#[derive(Clone, Debug, Default)]
pub struct SimpleAnalyzer;

impl SimpleAnalyzer {
    /// Create a new simple analyzer.
    pub fn new() -> Self {
        SimpleAnalyzer
    }
}

impl Analyzer for SimpleAnalyzer {
    fn analyze(&self, text: &str) -> Result<Vec<String>> {
        Ok(text
            .unicode_words()
            .map(|word| word.to_lowercase())
            .collect())
    }

    fn name(&self) -> &'static str {
        "simple"
    }
}
