//! Error types for the Rocchio library.
//!
//! All errors are represented by the [`RocchioError`] enum, which provides
//! detailed information about what went wrong.
//!
//! # Examples
//!
//! ```
//! use rocchio::error::{Result, RocchioError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(RocchioError::config("QE.doc.source: google is not implemented"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Rocchio operations.
///
/// This enum represents all possible errors that can occur in the library.
/// It uses the `thiserror` crate for automatic `Error` trait implementation
/// and provides convenient constructor methods for creating specific error
/// types.
#[derive(Error, Debug)]
pub enum RocchioError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors (unsupported doc source, malformed numerics, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Analysis-related errors (tokenization failures)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Query-related errors (parsing, invalid surface syntax, etc.)
    #[error("Query error: {0}")]
    Query(String),

    /// Index-related errors (document or term statistics lookup)
    #[error("Index error: {0}")]
    Index(String),

    /// Topic-inference errors
    #[error("Inference error: {0}")]
    Inference(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// A specialized Result type for Rocchio operations.
pub type Result<T> = std::result::Result<T, RocchioError>;

impl RocchioError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        RocchioError::Config(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        RocchioError::Analysis(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        RocchioError::Query(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        RocchioError::Query(msg.into()) // Parse errors are treated as query errors
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        RocchioError::Index(msg.into())
    }

    /// Create a new inference error.
    pub fn inference<S: Into<String>>(msg: S) -> Self {
        RocchioError::Inference(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        RocchioError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = RocchioError::config("Test config error");
        assert_eq!(error.to_string(), "Configuration error: Test config error");

        let error = RocchioError::analysis("Test analysis error");
        assert_eq!(error.to_string(), "Analysis error: Test analysis error");

        let error = RocchioError::index("Test index error");
        assert_eq!(error.to_string(), "Index error: Test index error");
    }

    #[test]
    fn test_parse_error_is_query_error() {
        let error = RocchioError::parse("bad syntax");
        match error {
            RocchioError::Query(_) => {}
            _ => panic!("Expected query error variant"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let rocchio_error = RocchioError::from(io_error);

        match rocchio_error {
            RocchioError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
