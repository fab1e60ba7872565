//! Error types for segment core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown comparator: {0}")]
    UnknownComparator(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
