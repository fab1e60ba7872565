//! Segment Runtime - evaluates `FilterSet`s against records
//!
//! This crate provides the evaluator, its per-instance catalog memo,
//! evaluation traces and in-memory reference adapters.

pub mod compare;
pub mod error;
pub mod evaluator;
pub mod memory;
pub mod trace;

// Re-export main types
pub use compare::{compare_scalar, normalize};
pub use error::{EvalError, Result};
pub use evaluator::{matches, Evaluator};
pub use memory::{ContactFieldSource, ContactRecord};
pub use trace::{ConditionTrace, FilterTrace, GroupTrace};
