//! Segment SDK
//!
//! High-level API for loading, saving, rendering and evaluating contact
//! filters.

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;

// Re-export main types
pub use builder::FilterEngineBuilder;
pub use config::EngineConfig;
pub use engine::{ConfiguredCatalog, FilterEngine};
pub use error::{Result, SdkError};

// Re-export commonly used types from dependencies
pub use segment_core::{
    AndGroup, ComparatorKind, ComparatorStyle, Condition, FieldCatalog, FieldCatalogProvider,
    FieldResolver, FilterSet,
};
pub use segment_parser::ConditionRow;
pub use segment_runtime::{ContactFieldSource, ContactRecord, FilterTrace};
