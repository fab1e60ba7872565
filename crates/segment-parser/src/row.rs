//! Strict single-condition builder
//!
//! Validates one AND-condition destined for re-rendering as a form row.
//! Unlike the bulk sanitizer this is fail-fast: any failed check yields no
//! row at all rather than a partial one.

use crate::error::{type_name, ParseError, Result};
use crate::escape::{escape_attr, sanitize_text};
use crate::sanitizer::coerce_index;
use segment_core::filter::{CONDITION_KEY, FIELD_NAME_KEY, FIELD_VALUE_KEY};
use segment_core::{ComparatorKind, Condition, FilterSet};
use serde::Serialize;
use serde_json::Value;

/// A validated, display-escaped condition row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionRow {
    /// Form field the row belongs to
    pub form_name: String,
    pub or_index: u64,
    pub and_index: u64,
    /// Lower-cased field identifier
    pub field: String,
    /// Comparator name as stored
    pub comparator: String,
    pub value: String,
}

impl ConditionRow {
    /// Validate a raw condition mapping.
    ///
    /// Checks, in order: non-empty form name, non-empty condition mapping,
    /// string operand (absent or null reads as empty), non-empty lower-cased
    /// field, known comparator.
    pub fn build(form_name: &str, or_index: &str, and_index: &str, condition: &Value) -> Result<Self> {
        if form_name.is_empty() {
            return Err(ParseError::MissingFormName);
        }

        let map = match condition {
            Value::Object(map) if !map.is_empty() => map,
            _ => return Err(ParseError::MissingCondition),
        };

        let value = match map.get(FIELD_VALUE_KEY) {
            None | Some(Value::Null) => "",
            Some(Value::String(s)) => s.as_str(),
            Some(other) => return Err(ParseError::NonStringValue(type_name(other))),
        };

        let field = map.get(FIELD_NAME_KEY).and_then(Value::as_str);
        let comparator = map.get(CONDITION_KEY).and_then(Value::as_str);

        Self::validated(
            form_name,
            coerce_index(or_index),
            coerce_index(and_index),
            field,
            comparator,
            value,
        )
    }

    /// Validate a condition already held in a `FilterSet`
    pub fn from_condition(
        form_name: &str,
        or_index: u64,
        and_index: u64,
        condition: &Condition,
    ) -> Result<Self> {
        if form_name.is_empty() {
            return Err(ParseError::MissingFormName);
        }
        if condition.is_empty() {
            return Err(ParseError::MissingCondition);
        }
        Self::validated(
            form_name,
            or_index,
            and_index,
            condition.field(),
            condition.comparator_name(),
            condition.value(),
        )
    }

    fn validated(
        form_name: &str,
        or_index: u64,
        and_index: u64,
        field: Option<&str>,
        comparator: Option<&str>,
        value: &str,
    ) -> Result<Self> {
        let field = sanitize_text(&field.unwrap_or_default().to_lowercase());
        if field.is_empty() {
            return Err(ParseError::EmptyField);
        }

        let comparator = comparator.unwrap_or_default();
        if ComparatorKind::parse(comparator).is_none() {
            return Err(ParseError::UnknownComparator(comparator.to_string()));
        }

        Ok(Self {
            form_name: escape_attr(form_name),
            or_index,
            and_index,
            field: escape_attr(&field),
            comparator: escape_attr(comparator),
            value: escape_attr(value),
        })
    }

    /// Form input name for one of the row's keys, e.g. `filters[1][2][field-name]`
    pub fn input_name(&self, key: &str) -> String {
        format!("{}[{}][{}][{}]", self.form_name, self.or_index, self.and_index, key)
    }

    pub fn kind(&self) -> Option<ComparatorKind> {
        ComparatorKind::parse(&self.comparator)
    }
}

/// Build a row from raw input, yielding nothing on any failed check
pub fn render_row(form_name: &str, or_index: &str, and_index: &str, condition: &Value) -> Option<ConditionRow> {
    match ConditionRow::build(form_name, or_index, and_index, condition) {
        Ok(row) => Some(row),
        Err(err) => {
            log::debug!("Skipping condition row {}.{}: {}", or_index, and_index, err);
            None
        }
    }
}

/// Every renderable row of a set, in OR then AND index order
pub fn render_rows(form_name: &str, set: &FilterSet) -> Vec<ConditionRow> {
    set.or_groups()
        .flat_map(|(or_index, group)| {
            group.iter().filter_map(move |(and_index, condition)| {
                ConditionRow::from_condition(form_name, or_index, and_index, condition)
                    .map_err(|err| {
                        log::debug!("Skipping condition row {}.{}: {}", or_index, and_index, err);
                    })
                    .ok()
            })
        })
        .collect()
}
