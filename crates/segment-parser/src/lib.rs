//! Segment Parser - turns persisted or submitted filter data into `FilterSet`s
//!
//! This crate provides:
//! - Escaping transforms for display and storage
//! - The lenient bulk sanitizer for nested OR/AND mappings
//! - Load/save entry points with the match-everything default
//! - The strict single-row builder used when re-rendering a condition

pub mod bridge;
pub mod error;
pub mod escape;
pub mod row;
pub mod sanitizer;

// Re-export main parser types
pub use bridge::{load_json, on_load, on_save, to_persisted};
pub use error::{ParseError, Result};
pub use escape::{escape_attr, sanitize_text, Escape};
pub use row::{render_row, render_rows, ConditionRow};
pub use sanitizer::{coerce_index, sanitize, try_sanitize};
