//! Rocchio pseudo-relevance-feedback query expansion.
//!
//! Query expansion adds search terms to a user's weighted search to improve
//! precision and/or recall. Rocchio's variant folds the top documents of the
//! initial search back into the query:
//!
//! ```text
//! expanded = alpha * query + beta * sum(feedback doc vectors)
//! ```
//!
//! implemented here as additive boost combination over `(field, text)`
//! terms, followed by a stable descending sort on boost and truncation to
//! the configured term count.
//!
//! # Examples
//!
//! See the crate-level example; [`RocchioExpander::expand_query`] is the
//! entry point.

use std::cmp::Ordering;

use log::{debug, warn};

use crate::analysis::Analyzer;
use crate::error::Result;
use crate::expansion::boost::BoostAssigner;
use crate::expansion::combine::combine;
use crate::expansion::config::ExpansionConfig;
use crate::expansion::feedback::{feedback_documents, feedback_vectors};
use crate::index::{DEFAULT_TEXT_FIELD, SearchReader, StoredDocument, TopHits};
use crate::query::QueryParser;
use crate::similarity::Similarity;
use crate::term::WeightedTerm;
use crate::term_vector::TermVector;

/// The outcome of one expansion call.
///
/// `query` is the re-parsed expanded query, or `None` when the re-serialized
/// term string failed to parse - callers must treat `None` as "expansion
/// failed, fall back to the original query". `terms` is the ranked,
/// deduplicated term list, non-increasing in boost, truncated to the
/// configured term count.
#[derive(Debug, Clone)]
pub struct ExpandedQuery<Q> {
    /// The expanded query object, if re-parsing succeeded.
    pub query: Option<Q>,
    /// The ranked expansion terms contributing to the query.
    pub terms: Vec<WeightedTerm>,
}

/// Rocchio query expander.
///
/// Holds the external collaborators (analyzer, index reader, similarity
/// model, query parser) plus the most recent call's ranked term list. One
/// expander serves one query at a time: `expand_query` takes `&mut self`
/// and overwrites the previous call's term list.
pub struct RocchioExpander<'a, P: QueryParser> {
    analyzer: &'a dyn Analyzer,
    reader: &'a dyn SearchReader,
    similarity: &'a dyn Similarity,
    parser: &'a P,
    field: String,
    expanded_terms: Vec<WeightedTerm>,
}

impl<'a, P: QueryParser> RocchioExpander<'a, P> {
    /// Create a new expander over the default text field.
    pub fn new(
        analyzer: &'a dyn Analyzer,
        reader: &'a dyn SearchReader,
        similarity: &'a dyn Similarity,
        parser: &'a P,
    ) -> Self {
        RocchioExpander {
            analyzer,
            reader,
            similarity,
            parser,
            field: DEFAULT_TEXT_FIELD.to_string(),
            expanded_terms: Vec::new(),
        }
    }

    /// Set the text field expansion reads from and produces terms in.
    pub fn with_field<S: Into<String>>(mut self, field: S) -> Self {
        self.field = field.into();
        self
    }

    /// Expand `query_str` using the top hits of its initial search.
    ///
    /// Resolves the first `min(doc_num, |hits|)` stored documents in rank
    /// order (the document source must be local; anything else fails before
    /// any retrieval) and delegates to
    /// [`expand_with_documents`](Self::expand_with_documents).
    pub fn expand_query(
        &mut self,
        query_str: &str,
        hits: &TopHits,
        config: &ExpansionConfig,
    ) -> Result<ExpandedQuery<P::Query>> {
        let docs = feedback_documents(self.reader, hits, config)?;
        self.expand_with_documents(query_str, &docs, config)
    }

    /// Expand `query_str` against already-resolved feedback documents.
    ///
    /// Documents yielding an empty term vector are silently excluded. The
    /// combined term list is sorted by boost descending with a stable sort
    /// (ties keep their relative input order) and truncated to
    /// `config.term_num`.
    pub fn expand_with_documents(
        &mut self,
        query_str: &str,
        docs: &[StoredDocument],
        config: &ExpansionConfig,
    ) -> Result<ExpandedQuery<P::Query>> {
        let doc_vectors = feedback_vectors(docs, config.doc_num, &self.field, self.analyzer)?;

        let assigner = BoostAssigner::new(self.similarity, &self.field);
        let docs_terms = assigner.set_boost(&doc_vectors, config.beta, config.decay);
        debug!("feedback terms: {}", docs_terms.len());

        let query_vector = TermVector::from_text(query_str, self.analyzer)?;
        let query_terms = assigner.set_boost_single(&query_vector, config.alpha);

        let mut combined = combine(&query_terms, &docs_terms);
        // Stable: equal boosts keep their relative input order.
        combined.sort_by(|a, b| {
            b.boost()
                .partial_cmp(&a.boost())
                .unwrap_or(Ordering::Equal)
        });

        let kept = config.term_num.min(combined.len());
        let query = self.merge_queries(&combined[..kept]);
        let terms = combined[..kept].to_vec();
        self.expanded_terms = combined;

        Ok(ExpandedQuery { query, terms })
    }

    /// Re-serialize the kept terms as `escaped_term^boost ...` surface text
    /// and parse it back into a query object.
    ///
    /// A parse failure is not an error of the expansion call: it is logged
    /// and surfaces as `None`.
    fn merge_queries(&self, terms: &[WeightedTerm]) -> Option<P::Query> {
        let mut surface = String::new();
        for term in terms {
            let escaped = self.parser.escape(term.term().text()).to_lowercase();
            surface.push_str(&escaped);
            surface.push('^');
            surface.push_str(&term.boost().to_string());
            surface.push(' ');
        }
        debug!("expanded surface query: {surface}");

        match self.parser.parse(&surface) {
            Ok(query) => Some(query),
            Err(e) => {
                warn!("expanded query failed to parse, falling back: {e}");
                None
            }
        }
    }

    /// The most recent call's ranked terms, truncated to `term_num`.
    ///
    /// Returns exactly `min(term_num, total)` terms from the front of the
    /// sorted sequence.
    pub fn expanded_terms(&self, term_num: usize) -> &[WeightedTerm] {
        &self.expanded_terms[..term_num.min(self.expanded_terms.len())]
    }
}
