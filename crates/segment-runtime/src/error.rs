//! Evaluation error types
//!
//! These never escape the boolean evaluation surface. They explain why a
//! condition was treated as a non-match and show up in traces and logs.

use thiserror::Error;

/// Reason a condition or record was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The resolver target is not a usable record
    #[error("Invalid record")]
    InvalidRecord,

    /// The condition has no field name
    #[error("Missing field name")]
    MissingField,

    /// The field is not in the catalog
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// The comparator is absent or not registered
    #[error("Unknown comparator: {0}")]
    UnknownComparator(String),

    /// A tag comparator on a scalar field, or a scalar comparator on `tags`
    #[error("Comparator '{comparator}' does not apply to field '{field}'")]
    ComparatorFieldMismatch { field: String, comparator: String },
}

/// Result type for evaluation steps
pub type Result<T> = std::result::Result<T, EvalError>;
