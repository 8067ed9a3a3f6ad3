//! Topic-model query expansion (alternative path).
//!
//! Instead of re-weighting feedback terms, this path asks an externally
//! trained topic model for a term representative of the latent topic of the
//! top feedback document, and appends that single term to the original
//! query. The model is an injected collaborator behind the [`TopicModel`]
//! trait - loaded once by the caller and reused, never a process-wide
//! singleton.

use log::{debug, warn};

use crate::analysis::Analyzer;
use crate::error::Result;
use crate::expansion::boost::merge_duplicates;
use crate::expansion::config::ExpansionConfig;
use crate::expansion::feedback::{feedback_documents, feedback_vectors};
use crate::expansion::rocchio::ExpandedQuery;
use crate::index::{DEFAULT_TEXT_FIELD, SearchReader, TopHits};
use crate::query::QueryParser;
use crate::term::{Term, WeightedTerm};

/// An inferred topic: its most representative word and the inference score.
#[derive(Debug, Clone, PartialEq)]
pub struct Topic {
    /// The word most representative of the topic.
    pub word: String,
    /// The model's confidence for this topic.
    pub score: f64,
}

impl Topic {
    /// Create a new topic.
    pub fn new<S: Into<String>>(word: S, score: f64) -> Self {
        Topic {
            word: word.into(),
            score,
        }
    }
}

/// Trait for external topic-inference models.
///
/// Implementations load their trained parameters once (see
/// [`LdaConfig`](crate::expansion::LdaConfig) for where batch drivers find
/// them) and must treat inference as read-only over those parameters:
/// `infer_topics` takes `&self` and may be called from multiple threads.
pub trait TopicModel: Send + Sync {
    /// Infer one topic per input element.
    ///
    /// The granularity of an "element" (whole document vs. single term) is
    /// the model's to define; this crate passes the top feedback document's
    /// raw term texts and takes what comes back. `None` entries mark
    /// elements the model could not map to a known topic word.
    fn infer_topics(&self, terms: &[String]) -> Result<Vec<Option<Topic>>>;
}

/// Topic-based query expander.
///
/// Resolves feedback documents exactly like the Rocchio path, then appends
/// the best-scoring inferred topic word to the original query string. When
/// inference yields no usable topic (or there are no feedback vectors at
/// all), the original query string is used unchanged.
pub struct TopicExpander<'a, P: QueryParser> {
    analyzer: &'a dyn Analyzer,
    reader: &'a dyn SearchReader,
    model: &'a dyn TopicModel,
    parser: &'a P,
    field: String,
    expanded_terms: Vec<WeightedTerm>,
}

impl<'a, P: QueryParser> TopicExpander<'a, P> {
    /// Create a new topic expander over the default text field.
    pub fn new(
        analyzer: &'a dyn Analyzer,
        reader: &'a dyn SearchReader,
        model: &'a dyn TopicModel,
        parser: &'a P,
    ) -> Self {
        TopicExpander {
            analyzer,
            reader,
            model,
            parser,
            field: DEFAULT_TEXT_FIELD.to_string(),
            expanded_terms: Vec::new(),
        }
    }

    /// Set the text field feedback documents are read from.
    pub fn with_field<S: Into<String>>(mut self, field: S) -> Self {
        self.field = field.into();
        self
    }

    /// Expand `query_str` with the topic of its top feedback document.
    pub fn expand_query(
        &mut self,
        query_str: &str,
        hits: &TopHits,
        config: &ExpansionConfig,
    ) -> Result<ExpandedQuery<P::Query>> {
        let docs = feedback_documents(self.reader, hits, config)?;
        let vectors = feedback_vectors(&docs, config.doc_num, &self.field, self.analyzer)?;

        let target = match vectors.first() {
            None => query_str.trim().to_string(),
            Some(first) => {
                let topics = self.model.infer_topics(first.terms())?;
                match best_topic(&topics) {
                    Some(topic) => {
                        debug!("appending topic word '{}' ({})", topic.word, topic.score);
                        format!("{} {}", query_str, topic.word).trim().to_string()
                    }
                    None => query_str.trim().to_string(),
                }
            }
        };

        let query = match self.parser.parse(&target) {
            Ok(query) => Some(query),
            Err(e) => {
                warn!("topic-expanded query failed to parse, falling back: {e}");
                None
            }
        };

        self.expanded_terms = terms_from_text(&target, &self.field);
        Ok(ExpandedQuery {
            query,
            terms: self.expanded_terms.clone(),
        })
    }

    /// The most recent call's terms, truncated to `term_num`.
    pub fn expanded_terms(&self, term_num: usize) -> &[WeightedTerm] {
        &self.expanded_terms[..term_num.min(self.expanded_terms.len())]
    }
}

/// Pick the highest-scoring inferred topic of the batch.
fn best_topic(topics: &[Option<Topic>]) -> Option<&Topic> {
    topics
        .iter()
        .flatten()
        .max_by(|a, b| a.score.total_cmp(&b.score))
}

/// Split a surface query string into unit-boost terms, duplicates merged.
fn terms_from_text(text: &str, field: &str) -> Vec<WeightedTerm> {
    let mut terms: Vec<WeightedTerm> = text
        .split_whitespace()
        .map(|word| WeightedTerm::new(Term::new(field, word), 1.0))
        .collect();
    merge_duplicates(&mut terms);
    terms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::SimpleAnalyzer;
    use crate::error::RocchioError;
    use crate::index::{ScoreDoc, StoredDocument};
    use crate::query::WeightedTermParser;

    #[derive(Debug)]
    struct MemoryReader {
        docs: Vec<StoredDocument>,
    }

    impl SearchReader for MemoryReader {
        fn doc(&self, doc_id: u64) -> Result<StoredDocument> {
            self.docs
                .get(doc_id as usize)
                .cloned()
                .ok_or_else(|| RocchioError::index(format!("no document {doc_id}")))
        }
        fn term_frequency(&self, _doc_id: u64, _term: &Term) -> Result<u32> {
            Ok(0)
        }
        fn doc_frequency(&self, _term: &Term) -> Result<u64> {
            Ok(1)
        }
        fn doc_count(&self) -> u64 {
            self.docs.len() as u64
        }
        fn field_length(&self, _doc_id: u64, _field: &str) -> Result<usize> {
            Ok(0)
        }
    }

    struct FixedModel(Vec<Option<Topic>>);

    impl TopicModel for FixedModel {
        fn infer_topics(&self, _terms: &[String]) -> Result<Vec<Option<Topic>>> {
            Ok(self.0.clone())
        }
    }

    fn reader() -> MemoryReader {
        MemoryReader {
            docs: vec![
                StoredDocument::new("A").with_value(DEFAULT_TEXT_FIELD, "car auto wheel"),
            ],
        }
    }

    fn config() -> ExpansionConfig {
        ExpansionConfig {
            doc_num: 1,
            ..ExpansionConfig::default()
        }
    }

    #[test]
    fn test_appends_best_scoring_topic() {
        let analyzer = SimpleAnalyzer::new();
        let reader = reader();
        let parser = WeightedTermParser::new();
        let model = FixedModel(vec![
            Some(Topic::new("vehicle", 0.4)),
            Some(Topic::new("engine", 0.9)),
            None,
        ]);
        let mut expander = TopicExpander::new(&analyzer, &reader, &model, &parser);

        let hits = TopHits::new(vec![ScoreDoc::new(0, 1.0)]);
        let expanded = expander.expand_query("car", &hits, &config()).unwrap();

        let query = expanded.query.expect("query should parse");
        let texts: Vec<_> = query.iter().map(|t| t.term().text()).collect();
        assert_eq!(texts, vec!["car", "engine"]);

        let term_texts: Vec<_> = expanded.terms.iter().map(|t| t.term().text()).collect();
        assert_eq!(term_texts, vec!["car", "engine"]);
    }

    #[test]
    fn test_no_usable_topic_keeps_original_query() {
        let analyzer = SimpleAnalyzer::new();
        let reader = reader();
        let parser = WeightedTermParser::new();
        let model = FixedModel(vec![None, None, None]);
        let mut expander = TopicExpander::new(&analyzer, &reader, &model, &parser);

        let hits = TopHits::new(vec![ScoreDoc::new(0, 1.0)]);
        let expanded = expander.expand_query("car", &hits, &config()).unwrap();

        let query = expanded.query.expect("query should parse");
        assert_eq!(query.len(), 1);
        assert_eq!(query[0].term().text(), "car");
    }

    #[test]
    fn test_no_feedback_vectors_keeps_original_query() {
        let analyzer = SimpleAnalyzer::new();
        let reader = MemoryReader { docs: vec![] };
        let parser = WeightedTermParser::new();
        let model = FixedModel(vec![Some(Topic::new("unused", 1.0))]);
        let mut expander = TopicExpander::new(&analyzer, &reader, &model, &parser);

        let hits = TopHits::new(vec![]);
        let expanded = expander.expand_query("car wheel", &hits, &config()).unwrap();

        let query = expanded.query.expect("query should parse");
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_expanded_terms_deduplicated() {
        assert_eq!(
            terms_from_text("car car engine", "contents").len(),
            2
        );
    }

    #[test]
    fn test_unsupported_doc_source_is_config_error() {
        let analyzer = SimpleAnalyzer::new();
        let reader = reader();
        let parser = WeightedTermParser::new();
        let model = FixedModel(vec![]);
        let mut expander = TopicExpander::new(&analyzer, &reader, &model, &parser);

        let hits = TopHits::new(vec![ScoreDoc::new(0, 1.0)]);
        let config = ExpansionConfig {
            doc_source: Some("google".to_string()),
            ..config()
        };

        assert!(expander.expand_query("car", &hits, &config).is_err());
    }
}
