//! Batch evaluation formats: query-file records and the result line writer.
//!
//! The batch driver that reads properties, opens the index, and loops over
//! queries lives outside this crate; the *formats* it speaks are defined
//! here so drivers and downstream analysis agree on them.
//!
//! Query file: one query per line, `<query_id><whitespace><query text>`.
//! Processing stops at end of file or at the first zero-length line.
//!
//! Output: one line per ranked document per query,
//!
//! ```text
//! <query_id> Q0 <doc_id> <rank> <score> <coord> [<tfNorm> <idfNorm> <boostNorm> ]*
//! ```
//!
//! with the per-term diagnostic triple emitted `query-terms-count` times,
//! padded with `0 0 0` when fewer expansion terms exist than requested.

use std::io::{BufRead, Write};

use crate::error::Result;
use crate::index::{SearchReader, TopHits};
use crate::scoring::DiagnosticScorer;
use crate::similarity::Similarity;
use crate::term::WeightedTerm;

/// One query read from a query file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRecord {
    /// The query tag used in the output.
    pub id: String,
    /// The query text.
    pub text: String,
}

/// Parse one query-file line. Returns `None` for a zero-length line (the
/// batch terminator).
pub fn parse_query_line(line: &str) -> Option<QueryRecord> {
    if line.is_empty() {
        return None;
    }
    let mut parts = line.splitn(2, char::is_whitespace);
    let id = parts.next()?.to_string();
    let text = parts.next().unwrap_or("").trim().to_string();
    Some(QueryRecord { id, text })
}

/// Read queries until end of file or the first zero-length line.
pub fn read_queries<R: BufRead>(reader: R) -> Result<Vec<QueryRecord>> {
    let mut queries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        match parse_query_line(&line) {
            Some(record) => queries.push(record),
            None => break,
        }
    }
    Ok(queries)
}

/// Writes the per-document evaluation lines for expanded queries.
pub struct EvalWriter<'a, W: Write> {
    writer: W,
    reader: &'a dyn SearchReader,
    scorer: DiagnosticScorer<'a>,
    term_count: usize,
    doc_count: usize,
}

impl<'a, W: Write> EvalWriter<'a, W> {
    /// Create a writer emitting `term_count` diagnostic triples per line and
    /// at most `doc_count` lines per query.
    pub fn new(
        writer: W,
        reader: &'a dyn SearchReader,
        similarity: &'a dyn Similarity,
        term_count: usize,
        doc_count: usize,
    ) -> Self {
        EvalWriter {
            writer,
            reader,
            scorer: DiagnosticScorer::new(reader, similarity),
            term_count,
            doc_count,
        }
    }

    /// Write one line per ranked hit of `query_id`, best hit first.
    ///
    /// `terms` is the expanded term list of the query, ranked by boost; its
    /// first `term_count` entries feed the diagnostic columns.
    pub fn write_query(
        &mut self,
        query_id: &str,
        hits: &TopHits,
        terms: &[WeightedTerm],
    ) -> Result<()> {
        for (i, score_doc) in hits.score_docs.iter().take(self.doc_count).enumerate() {
            let doc = self.reader.doc(score_doc.doc_id)?;
            let coord = self.scorer.coord(terms, score_doc.doc_id)?;

            write!(
                self.writer,
                "{} Q0 {} {} {} {}",
                query_id,
                doc.id(),
                i + 1,
                score_doc.score,
                coord
            )?;

            for j in 0..self.term_count {
                match terms.get(j) {
                    Some(term) => {
                        let tf = self.scorer.tf_norm(term.term(), score_doc.doc_id)?;
                        let idf = self.scorer.idf_norm(term.term(), terms)?;
                        let boost = self.scorer.boost_norm(term, terms);
                        write!(self.writer, " {tf} {idf} {boost} ")?;
                    }
                    None => write!(self.writer, " 0 0 0 ")?,
                }
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Consume the writer, returning the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{ScoreDoc, StoredDocument};
    use crate::term::Term;
    use std::io::Cursor;

    /// Minimal single-document corpus for formatting tests.
    struct OneDocReader;

    impl SearchReader for OneDocReader {
        fn doc(&self, _doc_id: u64) -> Result<StoredDocument> {
            Ok(StoredDocument::new("DOC-7"))
        }
        fn term_frequency(&self, _doc_id: u64, term: &Term) -> Result<u32> {
            Ok(if term.text() == "car" { 1 } else { 0 })
        }
        fn doc_frequency(&self, _term: &Term) -> Result<u64> {
            Ok(1)
        }
        fn doc_count(&self) -> u64 {
            1
        }
        fn field_length(&self, _doc_id: u64, _field: &str) -> Result<usize> {
            Ok(1)
        }
    }

    /// Unit arithmetic so the emitted numbers are exact.
    struct UnitSimilarity;

    impl Similarity for UnitSimilarity {
        fn idf(&self, _doc_freq: u64, _doc_count: u64) -> f32 {
            1.0
        }
        fn tf(&self, freq: f32) -> f32 {
            freq
        }
        fn length_norm(&self, _field_length: usize) -> f32 {
            1.0
        }
        fn coord(&self, overlap: usize, max_overlap: usize) -> f32 {
            overlap as f32 / max_overlap.max(1) as f32
        }
        fn name(&self) -> &'static str {
            "unit"
        }
    }

    fn wt(text: &str, boost: f32) -> WeightedTerm {
        WeightedTerm::new(Term::new("contents", text), boost)
    }

    #[test]
    fn test_parse_query_line() {
        let record = parse_query_line("401\tforeign minorities germany").unwrap();
        assert_eq!(record.id, "401");
        assert_eq!(record.text, "foreign minorities germany");

        assert!(parse_query_line("").is_none());

        let bare = parse_query_line("402").unwrap();
        assert_eq!(bare.id, "402");
        assert_eq!(bare.text, "");
    }

    #[test]
    fn test_read_queries_stops_at_blank_line() {
        let input = "1 first query\n2 second query\n\n3 unreachable\n";
        let queries = read_queries(Cursor::new(input)).unwrap();

        assert_eq!(queries.len(), 2);
        assert_eq!(queries[1].id, "2");
        assert_eq!(queries[1].text, "second query");
    }

    #[test]
    fn test_eval_line_format_with_padding() {
        let reader = OneDocReader;
        let similarity = UnitSimilarity;
        let mut writer = EvalWriter::new(Vec::new(), &reader, &similarity, 2, 10);

        let hits = TopHits::new(vec![ScoreDoc::new(0, 1.5)]);
        let terms = vec![wt("car", 2.0)];
        writer.write_query("401", &hits, &terms).unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        // One real term triple (tf=1, idf=1/1, boost=2/2), one padded triple.
        assert_eq!(output, "401 Q0 DOC-7 1 1.5 1 1 1 1  0 0 0 \n");
    }

    #[test]
    fn test_eval_respects_doc_count_cutoff() {
        let reader = OneDocReader;
        let similarity = UnitSimilarity;
        let mut writer = EvalWriter::new(Vec::new(), &reader, &similarity, 0, 2);

        let hits = TopHits::new(vec![
            ScoreDoc::new(0, 3.0),
            ScoreDoc::new(0, 2.0),
            ScoreDoc::new(0, 1.0),
        ]);
        writer.write_query("q", &hits, &[]).unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(output.lines().count(), 2);
        assert!(output.starts_with("q Q0 DOC-7 1 3 0\n"));
    }
}
