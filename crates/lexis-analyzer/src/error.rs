//! Error types for analysis and query interpretation

use thiserror::Error;

/// Errors that can occur while analyzing a string
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnalyzeError {
    /// The input string was empty
    #[error("Value must be a non-empty string")]
    EmptyValue,
}

/// Errors that can occur while building a predicate set from a query
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    /// A structured query parameter failed validation
    #[error("Invalid value for query parameter '{name}': {value:?}")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// Offending raw value
        value: String,
    },

    /// No trigger phrase matched the natural-language query
    #[error("Unable to parse natural language query: {0:?}")]
    Unparseable(String),
}
