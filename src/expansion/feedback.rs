//! Feedback-document resolution shared by the expansion paths.
//!
//! Pseudo-relevance feedback treats the top hits of the initial search as
//! relevant. Both expanders resolve documents the same way: the document
//! source must be local (validated before any index access), and the first
//! `min(doc_num, |hits|)` hits are fetched in rank order.

use log::trace;

use crate::analysis::Analyzer;
use crate::error::Result;
use crate::expansion::config::ExpansionConfig;
use crate::index::{SearchReader, StoredDocument, TopHits};
use crate::term_vector::TermVector;

/// Resolve the feedback documents for one expansion call.
///
/// Fails with a configuration error before touching the reader when the
/// configured document source is unsupported.
pub fn feedback_documents(
    reader: &dyn SearchReader,
    hits: &TopHits,
    config: &ExpansionConfig,
) -> Result<Vec<StoredDocument>> {
    config.validate_doc_source()?;

    let count = config.doc_num.min(hits.len());
    let mut docs = Vec::with_capacity(count);
    for score_doc in &hits.score_docs[..count] {
        docs.push(reader.doc(score_doc.doc_id)?);
    }
    Ok(docs)
}

/// Extract one term vector per feedback document, in rank order.
///
/// At most `doc_num` documents are considered. Documents with no text-field
/// values, or whose text analyzes to nothing, are silently excluded.
pub fn feedback_vectors(
    docs: &[StoredDocument],
    doc_num: usize,
    field: &str,
    analyzer: &dyn Analyzer,
) -> Result<Vec<TermVector>> {
    let mut vectors = Vec::with_capacity(doc_num.min(docs.len()));
    for doc in docs.iter().take(doc_num) {
        match TermVector::from_document(doc, field, analyzer)? {
            Some(vector) => vectors.push(vector),
            None => trace!("document {} has no '{}' text, skipped", doc.id(), field),
        }
    }
    Ok(vectors)
}
