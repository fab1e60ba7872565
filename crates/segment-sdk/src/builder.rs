//! Builder pattern for FilterEngine

use crate::config::EngineConfig;
use crate::engine::{ConfiguredCatalog, FilterEngine};
use crate::error::Result;
use segment_core::{FieldCatalog, FieldCatalogProvider};
use segment_runtime::ContactFieldSource;
use std::path::PathBuf;
use std::sync::Arc;

/// Builder for FilterEngine
///
/// # Example
///
/// ```rust,ignore
/// use segment_sdk::FilterEngineBuilder;
///
/// let engine = FilterEngineBuilder::new()
///     .with_fields(vec!["email".into(), "first_name".into()], vec!["plan".into()])
///     .enable_tracing(true)
///     .build()?;
///
/// let filter = engine.load(&stored_json);
/// let matched = engine.evaluate(&filter, &contact);
/// ```
pub struct FilterEngineBuilder {
    config: EngineConfig,
    config_file: Option<PathBuf>,
    provider: Option<Arc<dyn FieldCatalogProvider>>,
    fields: Option<(Vec<String>, Vec<String>)>,
}

impl FilterEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            config_file: None,
            provider: None,
            fields: None,
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the configuration from a YAML file at build time, replacing any
    /// settings made on this builder
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Set the field catalog provider
    pub fn with_catalog_provider(mut self, provider: Arc<dyn FieldCatalogProvider>) -> Self {
        self.provider = Some(provider);
        self.fields = None;
        self
    }

    /// Use fixed attribute and property field lists as the catalog source.
    ///
    /// Exclusions from the final configuration apply to the attribute list only.
    pub fn with_fields(mut self, attribute_fields: Vec<String>, property_fields: Vec<String>) -> Self {
        self.fields = Some((attribute_fields, property_fields));
        self.provider = None;
        self
    }

    /// Accept an extra field
    pub fn add_extra_field(mut self, field: impl Into<String>) -> Self {
        self.config.extra_fields.push(field.into());
        self
    }

    /// Exclude a field from the catalog
    pub fn exclude_field(mut self, field: impl Into<String>) -> Self {
        self.config.excluded_fields.push(field.into());
        self
    }

    /// Enable tracing
    pub fn enable_tracing(mut self, enable: bool) -> Self {
        self.config.enable_tracing = enable;
        self
    }

    /// Build the engine
    ///
    /// Without a catalog provider only the pseudo and extra fields are known.
    pub fn build(self) -> Result<FilterEngine> {
        let config = match self.config_file {
            Some(path) => {
                tracing::info!("Loading filter engine configuration from {}", path.display());
                EngineConfig::from_file(&path)?
            }
            None => self.config,
        };

        let provider: Arc<dyn FieldCatalogProvider> = match (self.provider, self.fields) {
            (Some(provider), _) => Arc::new(ConfiguredCatalog::new(provider, &config)),
            (None, Some((attribute_fields, mut property_fields))) => {
                property_fields.extend(config.extra_fields.iter().cloned());
                Arc::new(
                    ContactFieldSource::new(attribute_fields, property_fields)
                        .with_options(config.catalog_options()),
                )
            }
            (None, None) => {
                tracing::debug!("No catalog provider configured, using pseudo fields only");
                Arc::new(ConfiguredCatalog::new(Arc::new(FieldCatalog::default()), &config))
            }
        };

        tracing::info!(
            "Filter engine built (extra_fields={}, enable_tracing={})",
            config.extra_fields.len(),
            config.enable_tracing
        );
        Ok(FilterEngine::new(config, provider))
    }
}

impl Default for FilterEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
