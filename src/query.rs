//! Query parser seam and the boosted-term surface syntax.
//!
//! The expanded query is re-serialized as surface text - one
//! `escaped_term^boost` token per kept term - and handed back to the query
//! parser of the surrounding search engine. That parser is an external
//! collaborator behind the [`QueryParser`] trait, which also supplies the
//! escaping used to embed arbitrary term text as a literal.
//!
//! [`WeightedTermParser`] is the bundled reference implementation: it parses
//! the boosted-term syntax into a plain `Vec<WeightedTerm>` and
//! backslash-escapes query metacharacters. It exists so the crate is usable
//! and testable without an engine attached.
//!
//! # Examples
//!
//! ```
//! use rocchio::query::{QueryParser, WeightedTermParser};
//!
//! let parser = WeightedTermParser::new();
//! let terms = parser.parse("car^2.5 wheel").unwrap();
//!
//! assert_eq!(terms[0].term().text(), "car");
//! assert_eq!(terms[0].boost(), 2.5);
//! assert_eq!(terms[1].boost(), 1.0);
//! ```

use crate::error::{Result, RocchioError};
use crate::index::DEFAULT_TEXT_FIELD;
use crate::term::{Term, WeightedTerm};

/// Characters that must be escaped to appear literally in a query string.
const ESCAPED_CHARS: &str = "\\+-!():^[]\"{}~*?|&/";

/// Trait for external query parsers.
///
/// `Query` is whatever query object the surrounding engine executes; this
/// crate never looks inside it.
pub trait QueryParser {
    /// The engine's query object type.
    type Query;

    /// Parse surface query syntax (`term^boost term^boost ...`) into a query
    /// object.
    fn parse(&self, query_str: &str) -> Result<Self::Query>;

    /// Escape arbitrary text for safe inclusion as a literal term.
    fn escape(&self, text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            if ESCAPED_CHARS.contains(c) {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped
    }
}

/// A reference parser for the boosted-term surface syntax.
///
/// Parses whitespace-separated `term^boost` tokens (boost optional,
/// defaulting to 1.0) into weighted terms against a fixed field. Escaped
/// metacharacters inside the term are unescaped.
#[derive(Debug, Clone)]
pub struct WeightedTermParser {
    field: String,
}

impl Default for WeightedTermParser {
    fn default() -> Self {
        Self::new()
    }
}

impl WeightedTermParser {
    /// Create a parser targeting the default text field.
    pub fn new() -> Self {
        WeightedTermParser {
            field: DEFAULT_TEXT_FIELD.to_string(),
        }
    }

    /// Set the field parsed terms belong to.
    pub fn with_field<S: Into<String>>(mut self, field: S) -> Self {
        self.field = field.into();
        self
    }

    /// Split one token into term text and boost at the last unescaped `^`.
    fn split_token(token: &str) -> (&str, Option<&str>) {
        let mut split = None;
        let mut escaped = false;
        for (i, c) in token.char_indices() {
            if escaped {
                escaped = false;
                continue;
            }
            match c {
                '\\' => escaped = true,
                '^' => split = Some(i),
                _ => {}
            }
        }
        match split {
            Some(i) => (&token[..i], Some(&token[i + 1..])),
            None => (token, None),
        }
    }

    fn unescape(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl QueryParser for WeightedTermParser {
    type Query = Vec<WeightedTerm>;

    fn parse(&self, query_str: &str) -> Result<Vec<WeightedTerm>> {
        let mut terms = Vec::new();

        for token in query_str.split_whitespace() {
            let (text, boost) = Self::split_token(token);
            if text.is_empty() {
                return Err(RocchioError::parse(format!("empty term in '{token}'")));
            }
            let boost = match boost {
                Some(raw) => raw.parse::<f32>().map_err(|_| {
                    RocchioError::parse(format!("invalid boost '{raw}' in '{token}'"))
                })?,
                None => 1.0,
            };
            terms.push(WeightedTerm::new(
                Term::new(self.field.clone(), Self::unescape(text)),
                boost,
            ));
        }

        Ok(terms)
    }
}
