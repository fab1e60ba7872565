//! Filter Model
//!
//! A filter is an "OR of ANDs": a `FilterSet` holds indexed `AndGroup`s and a
//! record matches when at least one group matches. Each `AndGroup` holds
//! indexed `Condition`s that must all hold.
//!
//! # Persisted shape
//! ```json
//! {
//!   "1": {
//!     "1": { "field-name": "email", "condition": "contains", "field-value": "@acme.io" },
//!     "2": { "field-name": "tags", "condition": "has", "field-value": "vip" }
//!   },
//!   "2": {}
//! }
//! ```
//!
//! ## Edge semantics
//! - an empty `FilterSet` matches nothing
//! - an empty `AndGroup` matches every valid record
//!
//! Conditions are format-preserving: keys other than the three canonical ones
//! are carried in `Condition::extra`, and the comparator is kept as the name
//! that was stored. Comparator and field validity are checked at evaluation.

mod types;

pub use types::{
    AndGroup, Condition, FilterSet, CONDITION_KEY, FIELD_NAME_KEY, FIELD_VALUE_KEY, TAGS_FIELD,
};
