//! Expansion configuration and the property keys that feed it.
//!
//! Configuration arrives as flat string properties (the same key set batch
//! drivers put in their `.properties` files); [`ExpansionConfig::from_properties`]
//! converts and validates them in one step so malformed values fail at
//! startup, not on first use.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashMap;
//! use rocchio::expansion::ExpansionConfig;
//!
//! let mut props = HashMap::new();
//! props.insert("rocchio.alpha".to_string(), "1.0".to_string());
//! props.insert("rocchio.beta".to_string(), "0.75".to_string());
//! props.insert("QE.doc.num".to_string(), "10".to_string());
//! props.insert("QE.term.num".to_string(), "25".to_string());
//!
//! let config = ExpansionConfig::from_properties(&props).unwrap();
//! assert_eq!(config.alpha, 1.0);
//! assert_eq!(config.decay, 0.0); // defaulted
//! ```

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RocchioError};

/// Which expansion algorithm to run.
pub const METHOD_KEY: &str = "QE.method";
/// Per-rank decay of a feedback document's contribution. 0 - no decay.
pub const DECAY_KEY: &str = "QE.decay";
/// Number of feedback documents to use.
pub const DOC_NUM_KEY: &str = "QE.doc.num";
/// Maximum number of terms kept in the expanded query.
pub const TERM_NUM_KEY: &str = "QE.term.num";
/// Where feedback documents come from.
pub const DOC_SOURCE_KEY: &str = "QE.doc.source";
/// The only supported document source: locally retrieved hits.
pub const DOC_SOURCE_LOCAL: &str = "local";
/// Rocchio query weight.
pub const ROCCHIO_ALPHA_KEY: &str = "rocchio.alpha";
/// Rocchio feedback weight.
pub const ROCCHIO_BETA_KEY: &str = "rocchio.beta";
/// Directory holding a trained topic model.
pub const LDA_MODEL_DIR_KEY: &str = "lda.model_dir";
/// Name of the trained topic model.
pub const LDA_MODEL_NAME_KEY: &str = "lda.model_name";

/// Index location (batch drivers).
pub const INDEX_DIR_KEY: &str = "index-dir";
/// Input query file (batch drivers).
pub const QUERY_FILE_KEY: &str = "query-file";
/// Output rank cutoff per query (batch drivers).
pub const DOCS_PER_QUERY_KEY: &str = "docs-per-query";
/// Number of per-term diagnostic columns emitted (batch drivers).
pub const QUERY_TERMS_COUNT_KEY: &str = "query-terms-count";
/// Output path (batch drivers).
pub const OUT_FILE_KEY: &str = "out-file";

/// Expansion algorithm selected by [`METHOD_KEY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExpansionMethod {
    /// No expansion; the original query is used as-is.
    #[default]
    None,
    /// Rocchio pseudo-relevance feedback.
    Rocchio,
    /// Topic-model expansion.
    Lda,
}

impl FromStr for ExpansionMethod {
    type Err = RocchioError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(ExpansionMethod::None),
            "rocchio" => Ok(ExpansionMethod::Rocchio),
            "lda" => Ok(ExpansionMethod::Lda),
            other => Err(RocchioError::config(format!(
                "{METHOD_KEY}: unknown expansion method '{other}'"
            ))),
        }
    }
}

/// Parameters of one expansion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpansionConfig {
    /// Weight of the original query terms.
    pub alpha: f32,
    /// Weight of the feedback document terms.
    pub beta: f32,
    /// Per-rank attenuation of feedback documents (`decay * rank`).
    pub decay: f32,
    /// How many feedback documents to use.
    pub doc_num: usize,
    /// Maximum number of terms kept in the expanded query.
    pub term_num: usize,
    /// Feedback document source. Only `"local"` (or unset) is supported;
    /// anything else is a fatal configuration error.
    pub doc_source: Option<String>,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        ExpansionConfig {
            alpha: 1.0,
            beta: 0.75,
            decay: 0.0,
            doc_num: 10,
            term_num: 25,
            doc_source: None,
        }
    }
}

impl ExpansionConfig {
    /// Build a config from flat string properties, failing fast on missing
    /// or malformed values.
    pub fn from_properties(props: &HashMap<String, String>) -> Result<Self> {
        let config = ExpansionConfig {
            alpha: required_f32(props, ROCCHIO_ALPHA_KEY)?,
            beta: required_f32(props, ROCCHIO_BETA_KEY)?,
            decay: optional_f32(props, DECAY_KEY, 0.0)?,
            doc_num: required_usize(props, DOC_NUM_KEY)?,
            term_num: required_usize(props, TERM_NUM_KEY)?,
            doc_source: props.get(DOC_SOURCE_KEY).cloned(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate field values. Called by [`from_properties`](Self::from_properties);
    /// hand-built configs can call it directly.
    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() || !self.beta.is_finite() || !self.decay.is_finite() {
            return Err(RocchioError::config(
                "alpha, beta and decay must be finite numbers",
            ));
        }
        self.validate_doc_source()
    }

    /// Check that the document source is supported. The expander calls this
    /// before touching the index.
    pub fn validate_doc_source(&self) -> Result<()> {
        match self.doc_source.as_deref() {
            None => Ok(()),
            Some(DOC_SOURCE_LOCAL) => Ok(()),
            Some(other) => Err(RocchioError::config(format!(
                "{DOC_SOURCE_KEY}: {other} is not implemented"
            ))),
        }
    }
}

/// Configuration of an externally trained topic model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LdaConfig {
    /// Directory holding the trained model.
    pub model_dir: String,
    /// Name of the trained model.
    pub model_name: String,
}

impl LdaConfig {
    /// Build a config from flat string properties.
    pub fn from_properties(props: &HashMap<String, String>) -> Result<Self> {
        Ok(LdaConfig {
            model_dir: required_string(props, LDA_MODEL_DIR_KEY)?,
            model_name: required_string(props, LDA_MODEL_NAME_KEY)?,
        })
    }
}

fn required_string(props: &HashMap<String, String>, key: &str) -> Result<String> {
    props
        .get(key)
        .cloned()
        .ok_or_else(|| RocchioError::config(format!("{key}: missing required property")))
}

fn required_f32(props: &HashMap<String, String>, key: &str) -> Result<f32> {
    parse_f32(&required_string(props, key)?, key)
}

fn optional_f32(props: &HashMap<String, String>, key: &str, default: f32) -> Result<f32> {
    match props.get(key) {
        Some(raw) => parse_f32(raw, key),
        None => Ok(default),
    }
}

fn required_usize(props: &HashMap<String, String>, key: &str) -> Result<usize> {
    let raw = required_string(props, key)?;
    raw.trim()
        .parse::<usize>()
        .map_err(|_| RocchioError::config(format!("{key}: '{raw}' is not a valid count")))
}

fn parse_f32(raw: &str, key: &str) -> Result<f32> {
    raw.trim()
        .parse::<f32>()
        .map_err(|_| RocchioError::config(format!("{key}: '{raw}' is not a valid number")))
}
