//! # Rocchio
//!
//! Pseudo-relevance-feedback query expansion for text search, implementing
//! Rocchio's algorithm: the top documents returned by an initial search are
//! assumed relevant, their term statistics are folded back into the original
//! query, and the result is a re-weighted, deduplicated, boost-ranked query
//! intended to improve recall and precision.
//!
//! The crate is the expansion engine only. The search index, text analyzer,
//! query parser, similarity model, and (optional) topic-inference model are
//! external collaborators consumed through traits:
//!
//! - [`index::SearchReader`] - per-document term statistics and stored fields
//! - [`analysis::Analyzer`] - tokenization
//! - [`query::QueryParser`] - surface-syntax parsing and escaping
//! - [`similarity::Similarity`] - idf/tf/length-norm/coord arithmetic
//! - [`expansion::TopicModel`] - topic inference for the alternative path
//!
//! ## Example
//!
//! ```
//! use rocchio::analysis::SimpleAnalyzer;
//! use rocchio::expansion::{ExpansionConfig, RocchioExpander};
//! use rocchio::index::{ScoreDoc, SearchReader, StoredDocument, TopHits};
//! use rocchio::query::WeightedTermParser;
//! use rocchio::similarity::ClassicSimilarity;
//! use rocchio::term::Term;
//! use rocchio::error::Result;
//!
//! #[derive(Debug)]
//! struct OneDocIndex(StoredDocument);
//!
//! impl SearchReader for OneDocIndex {
//!     fn doc(&self, _doc_id: u64) -> Result<StoredDocument> {
//!         Ok(self.0.clone())
//!     }
//!     fn term_frequency(&self, _doc_id: u64, _term: &Term) -> Result<u32> {
//!         Ok(0)
//!     }
//!     fn doc_frequency(&self, _term: &Term) -> Result<u64> {
//!         Ok(1)
//!     }
//!     fn doc_count(&self) -> u64 {
//!         1
//!     }
//!     fn field_length(&self, _doc_id: u64, _field: &str) -> Result<usize> {
//!         Ok(0)
//!     }
//! }
//!
//! let reader = OneDocIndex(StoredDocument::new("d1").with_value("contents", "car auto wheel"));
//! let analyzer = SimpleAnalyzer::new();
//! let similarity = ClassicSimilarity::new();
//! let parser = WeightedTermParser::new();
//!
//! let mut expander = RocchioExpander::new(&analyzer, &reader, &similarity, &parser);
//! let hits = TopHits::new(vec![ScoreDoc::new(0, 1.0)]);
//! let expanded = expander.expand_query("car", &hits, &ExpansionConfig::default()).unwrap();
//!
//! assert!(!expanded.terms.is_empty());
//! ```

pub mod analysis;
pub mod error;
pub mod expansion;
pub mod index;
pub mod query;
pub mod report;
pub mod scoring;
pub mod similarity;
pub mod term;
pub mod term_vector;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
