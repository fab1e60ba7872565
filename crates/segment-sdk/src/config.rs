//! Configuration types for FilterEngine

use crate::error::{Result, SdkError};
use segment_core::CatalogOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main engine configuration
///
/// ```yaml
/// excluded_fields: [contact_id]
/// pseudo_fields: [owner, tags, age]
/// extra_fields: [lifetime_value]
/// enable_tracing: false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Fields removed from the catalog
    pub excluded_fields: Vec<String>,

    /// Literal fields appended to the catalog
    pub pseudo_fields: Vec<String>,

    /// Additional fields always accepted by conditions
    pub extra_fields: Vec<String>,

    /// Log per-condition traces when evaluating
    pub enable_tracing: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        let catalog = CatalogOptions::default();
        Self {
            excluded_fields: catalog.excluded_fields,
            pseudo_fields: catalog.pseudo_fields,
            extra_fields: Vec::new(),
            enable_tracing: false,
        }
    }

    /// Parse a configuration from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Exclude a field from the catalog
    pub fn with_excluded_field(mut self, field: impl Into<String>) -> Self {
        self.excluded_fields.push(field.into());
        self
    }

    /// Append a pseudo-field
    pub fn with_pseudo_field(mut self, field: impl Into<String>) -> Self {
        self.pseudo_fields.push(field.into());
        self
    }

    /// Accept an extra field
    pub fn with_extra_field(mut self, field: impl Into<String>) -> Self {
        self.extra_fields.push(field.into());
        self
    }

    /// Enable tracing
    pub fn enable_tracing(mut self, enable: bool) -> Self {
        self.enable_tracing = enable;
        self
    }

    /// Catalog assembly options derived from this configuration
    pub fn catalog_options(&self) -> CatalogOptions {
        CatalogOptions {
            excluded_fields: self.excluded_fields.clone(),
            pseudo_fields: self.pseudo_fields.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        let blank = self
            .excluded_fields
            .iter()
            .chain(&self.pseudo_fields)
            .chain(&self.extra_fields)
            .any(|field| field.trim().is_empty());
        if blank {
            return Err(SdkError::ConfigError("field names must not be blank".to_string()));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
