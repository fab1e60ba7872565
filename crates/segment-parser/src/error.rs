//! Parser error types

use thiserror::Error;

/// Parser error
#[derive(Error, Debug)]
pub enum ParseError {
    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A level of the nested structure has the wrong type
    #[error("Malformed filter at '{path}': expected {expected}, got {actual}")]
    Shape {
        path: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Row rendering without a form field name
    #[error("Missing form field name")]
    MissingFormName,

    /// Row rendering without a condition mapping
    #[error("Missing condition")]
    MissingCondition,

    /// Row operand is not a string
    #[error("Condition value must be a string, got {0}")]
    NonStringValue(&'static str),

    /// Row field name is empty after sanitizing
    #[error("Empty field name")]
    EmptyField,

    /// Row comparator is absent or not registered
    #[error("Unknown comparator: {0}")]
    UnknownComparator(String),
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// JSON type name used in error messages
pub(crate) fn type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
