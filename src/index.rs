//! Search index seam: stored documents, ranked hits, and the reader trait.
//!
//! The index itself (storage, inverted lists, ranked retrieval) lives outside
//! this crate. Expansion consumes three things from it: stored fields of the
//! feedback documents, per-document term statistics for diagnostics, and the
//! ranked hit list of the initial search. The first two arrive through
//! [`SearchReader`]; the hit list arrives as a [`TopHits`] value produced by
//! the external engine, so this crate never executes a query itself.
//!
//! # Examples
//!
//! ```
//! use rocchio::index::StoredDocument;
//!
//! let doc = StoredDocument::new("doc-1")
//!     .with_value("title", "Automobile history")
//!     .with_value("contents", "the first car")
//!     .with_value("contents", "was a steam carriage");
//!
//! assert_eq!(doc.values("contents").len(), 2);
//! assert_eq!(doc.first_value("title"), Some("Automobile history"));
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::term::Term;

/// The default text field expansion reads from.
pub const DEFAULT_TEXT_FIELD: &str = "contents";

/// The stored title field.
pub const TITLE_FIELD: &str = "title";

/// The stored summary field.
pub const SUMMARY_FIELD: &str = "summary";

/// Maximum number of characters borrowed from the text when a document has
/// no title of its own.
const TITLE_FALLBACK_LENGTH: usize = 200;

/// A document's stored fields plus its external identifier.
///
/// Fields are multi-valued: a field may carry any number of stored string
/// values, retrieved in insertion order. Expansion only ever reads the text
/// field values and the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    id: String,
    fields: HashMap<String, Vec<String>>,
}

impl StoredDocument {
    /// Create a new document with no stored fields.
    pub fn new<S: Into<String>>(id: S) -> Self {
        StoredDocument {
            id: id.into(),
            fields: HashMap::new(),
        }
    }

    /// Build a document from raw content, applying the ingestion skip rule.
    ///
    /// An empty title falls back to a prefix of the text. A document with
    /// neither title nor text is not indexable and yields `None` - a skip,
    /// not a failure.
    pub fn from_content<S: Into<String>>(
        id: S,
        title: &str,
        text: &str,
        summary: &str,
    ) -> Option<Self> {
        let text = text.trim();
        let mut title = title.trim().to_string();
        if title.is_empty() {
            title = text.chars().take(TITLE_FALLBACK_LENGTH).collect();
        }
        if title.is_empty() {
            return None;
        }

        let mut doc = StoredDocument::new(id)
            .with_value(TITLE_FIELD, title)
            .with_value(DEFAULT_TEXT_FIELD, text);
        if !summary.is_empty() {
            doc = doc.with_value(SUMMARY_FIELD, summary);
        }
        Some(doc)
    }

    /// Append a stored value for a field (builder form).
    pub fn with_value<F, V>(mut self, field: F, value: V) -> Self
    where
        F: Into<String>,
        V: Into<String>,
    {
        self.add_value(field, value);
        self
    }

    /// Append a stored value for a field.
    pub fn add_value<F, V>(&mut self, field: F, value: V)
    where
        F: Into<String>,
        V: Into<String>,
    {
        self.fields.entry(field.into()).or_default().push(value.into());
    }

    /// Get the document's external identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get all stored values of a field, in insertion order.
    pub fn values(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Get the first stored value of a field.
    pub fn first_value(&self, field: &str) -> Option<&str> {
        self.values(field).first().map(String::as_str)
    }
}

/// One ranked hit: an opaque document id and its retrieval score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreDoc {
    /// The document ID.
    pub doc_id: u64,
    /// The relevance score.
    pub score: f32,
}

impl ScoreDoc {
    /// Create a new score/doc pair.
    pub fn new(doc_id: u64, score: f32) -> Self {
        ScoreDoc { doc_id, score }
    }
}

/// The ranked result list of one search, best hit first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopHits {
    /// The ranked hits.
    pub score_docs: Vec<ScoreDoc>,
    /// Total number of matching documents (may exceed `score_docs.len()`).
    pub total_hits: u64,
}

impl TopHits {
    /// Create a result list from ranked hits.
    pub fn new(score_docs: Vec<ScoreDoc>) -> Self {
        let total_hits = score_docs.len() as u64;
        TopHits {
            score_docs,
            total_hits,
        }
    }

    /// Create a result list with an explicit total-hits count.
    pub fn with_total(score_docs: Vec<ScoreDoc>, total_hits: u64) -> Self {
        TopHits {
            score_docs,
            total_hits,
        }
    }

    /// Number of hits actually returned.
    pub fn len(&self) -> usize {
        self.score_docs.len()
    }

    /// Whether the search returned no hits.
    pub fn is_empty(&self) -> bool {
        self.score_docs.is_empty()
    }
}

/// Read access to an already-built search index.
///
/// Everything the expansion engine and the diagnostic scorers need from the
/// index goes through this trait: stored-field retrieval by document id and
/// per-document/corpus term statistics. Ranked query execution is
/// deliberately absent - hit lists are produced by the external engine and
/// passed in as [`TopHits`].
pub trait SearchReader: Send + Sync {
    /// Retrieve a document's stored fields by its index-internal id.
    fn doc(&self, doc_id: u64) -> Result<StoredDocument>;

    /// Raw frequency of `term` within the document's stored term vector
    /// (0 if absent).
    fn term_frequency(&self, doc_id: u64, term: &Term) -> Result<u32>;

    /// Number of documents in the corpus containing `term`.
    fn doc_frequency(&self, term: &Term) -> Result<u64>;

    /// Total number of documents in the corpus.
    fn doc_count(&self) -> u64;

    /// Total number of terms stored in `field` of the document.
    fn field_length(&self, doc_id: u64, field: &str) -> Result<usize>;
}
