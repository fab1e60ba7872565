//! Segment Core - Core types and contracts for the segment filter engine
//!
//! This crate provides the fundamental types used across the segment crates:
//! - Comparator registry (operator kinds, labels, style tags)
//! - Filter model (`FilterSet` of `AndGroup`s of `Condition`s)
//! - Field resolver and field catalog contracts
//! - Error types

pub mod catalog;
pub mod comparator;
pub mod error;
pub mod filter;
pub mod resolver;

// Re-export commonly used types
pub use catalog::{CatalogOptions, FieldCatalog, FieldCatalogProvider};
pub use comparator::{is_known, style_of, ComparatorKind, ComparatorStyle};
pub use error::CoreError;
pub use filter::{AndGroup, Condition, FilterSet, TAGS_FIELD};
pub use resolver::FieldResolver;
