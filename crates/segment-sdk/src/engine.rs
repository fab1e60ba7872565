//! FilterEngine - the main entry point
//!
//! Bundles the load/save bridge, row rendering and evaluation behind one
//! type. An engine memoizes its field catalog; build a new engine to pick up
//! catalog changes.

use crate::config::EngineConfig;
use crate::error::Result;
use segment_core::{
    CatalogOptions, FieldCatalog, FieldCatalogProvider, FieldResolver, FilterSet,
};
use segment_parser::ConditionRow;
use segment_runtime::{Evaluator, FilterTrace};
use serde_json::Value;
use std::sync::Arc;

/// Catalog provider applying the engine configuration to another provider.
///
/// The inner provider's fields are treated as attribute fields, so exclusions
/// apply to them. Extra fields and pseudo-fields follow in that order.
pub struct ConfiguredCatalog {
    inner: Arc<dyn FieldCatalogProvider>,
    options: CatalogOptions,
    extra_fields: Vec<String>,
}

impl ConfiguredCatalog {
    pub fn new(inner: Arc<dyn FieldCatalogProvider>, config: &EngineConfig) -> Self {
        Self {
            inner,
            options: config.catalog_options(),
            extra_fields: config.extra_fields.clone(),
        }
    }
}

impl FieldCatalogProvider for ConfiguredCatalog {
    fn list_fields(&self) -> Vec<String> {
        FieldCatalog::assemble(self.inner.list_fields(), self.extra_fields.clone(), &self.options)
            .list_fields()
    }
}

/// Contact filter engine
#[derive(Debug)]
pub struct FilterEngine {
    config: EngineConfig,
    evaluator: Evaluator,
}

impl FilterEngine {
    /// `provider` must already reflect `config`; see `FilterEngineBuilder`
    pub(crate) fn new(config: EngineConfig, provider: Arc<dyn FieldCatalogProvider>) -> Self {
        Self {
            config,
            evaluator: Evaluator::new(provider),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Field catalog, listed on first use
    pub fn catalog(&self) -> &FieldCatalog {
        self.evaluator.catalog()
    }

    /// Build a filter from stored data for display
    pub fn load(&self, raw: &Value) -> FilterSet {
        segment_parser::on_load(raw)
    }

    /// Build a filter from stored JSON text for display
    pub fn load_json(&self, json: &str) -> Result<FilterSet> {
        Ok(segment_parser::load_json(json)?)
    }

    /// Build a filter from submitted data for storage
    pub fn save(&self, raw: &Value) -> FilterSet {
        segment_parser::on_save(raw)
    }

    /// Encode a filter into its persisted JSON form
    pub fn persist(&self, set: &FilterSet) -> Result<Value> {
        Ok(segment_parser::to_persisted(set)?)
    }

    /// Validate a single condition row for rendering
    pub fn render_row(
        &self,
        form_name: &str,
        or_index: &str,
        and_index: &str,
        condition: &Value,
    ) -> Option<ConditionRow> {
        segment_parser::render_row(form_name, or_index, and_index, condition)
    }

    /// All renderable rows of a filter
    pub fn render_rows(&self, form_name: &str, set: &FilterSet) -> Vec<ConditionRow> {
        segment_parser::render_rows(form_name, set)
    }

    /// Returns true if `record` matches `set`
    pub fn evaluate<R: FieldResolver + ?Sized>(&self, set: &FilterSet, record: &R) -> bool {
        if self.config.enable_tracing {
            return self.evaluate_with_trace(set, record).0;
        }
        self.evaluator.matches(set, record)
    }

    /// Evaluate and return the per-condition trace
    pub fn evaluate_with_trace<R: FieldResolver + ?Sized>(
        &self,
        set: &FilterSet,
        record: &R,
    ) -> (bool, FilterTrace) {
        let trace = self.evaluator.trace(set, record);
        if self.config.enable_tracing {
            log_conditions(&trace);
        }
        tracing::debug!(
            "Filter evaluated: result={}, matched_groups={:?}, failed_conditions={}",
            trace.result,
            trace.matched_groups(),
            trace.failed_conditions().count()
        );
        (trace.result, trace)
    }
}

fn log_conditions(trace: &FilterTrace) {
    if !trace.record_valid {
        tracing::debug!("Record is not valid, no conditions evaluated");
        return;
    }
    for group in &trace.groups {
        for condition in &group.conditions {
            tracing::debug!(
                or_index = group.or_index,
                and_index = condition.and_index,
                field = condition.field.as_deref().unwrap_or_default(),
                comparator = condition.comparator.as_deref().unwrap_or_default(),
                value = %condition.value,
                result = condition.result,
                rejection = condition.rejection.as_deref().unwrap_or_default(),
                "Condition evaluated"
            );
        }
    }
}
