//! Filter evaluation
//!
//! Walks a `FilterSet` against a record:
//! - a set matches when any OR-group matches (empty set: no match)
//! - a group matches when all of its conditions hold (empty group: match)
//! - a condition that cannot be evaluated is a non-match for that condition
//! - an invalid record never matches

use crate::compare::{compare_scalar, normalize};
use crate::error::{EvalError, Result};
use crate::trace::{ConditionTrace, FilterTrace, GroupTrace};
use segment_core::{
    AndGroup, ComparatorKind, ComparatorStyle, Condition, FieldCatalog, FieldCatalogProvider,
    FieldResolver, FilterSet,
};
use std::sync::{Arc, OnceLock};

/// Evaluator bound to a field catalog provider.
///
/// The catalog is fetched from the provider on first use and kept for the
/// lifetime of the evaluator. Create a new evaluator to pick up catalog changes.
pub struct Evaluator {
    provider: Arc<dyn FieldCatalogProvider>,
    catalog: OnceLock<FieldCatalog>,
}

impl std::fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Evaluator")
            .field("catalog", &self.catalog.get())
            .finish_non_exhaustive()
    }
}

impl Evaluator {
    /// Create an evaluator that lists fields lazily from `provider`
    pub fn new(provider: Arc<dyn FieldCatalogProvider>) -> Self {
        Self {
            provider,
            catalog: OnceLock::new(),
        }
    }

    /// Create an evaluator with a ready catalog
    pub fn with_catalog(catalog: FieldCatalog) -> Self {
        Self {
            provider: Arc::new(catalog.clone()),
            catalog: OnceLock::from(catalog),
        }
    }

    /// The memoized catalog
    pub fn catalog(&self) -> &FieldCatalog {
        self.catalog.get_or_init(|| {
            let catalog = FieldCatalog::new(self.provider.list_fields());
            tracing::debug!("Loaded field catalog with {} fields", catalog.len());
            catalog
        })
    }

    /// Returns true if at least one OR-group of `set` matches `record`
    pub fn matches<R: FieldResolver + ?Sized>(&self, set: &FilterSet, record: &R) -> bool {
        matches(set, record, self.catalog())
    }

    /// Returns true if every condition of `group` holds for `record`
    pub fn check_and<R: FieldResolver + ?Sized>(&self, group: &AndGroup, record: &R) -> bool {
        check_and(group, record, self.catalog())
    }

    /// Evaluate one condition, treating any rejection as a non-match
    pub fn check<R: FieldResolver + ?Sized>(&self, condition: &Condition, record: &R) -> bool {
        check(condition, record, self.catalog())
    }

    /// Evaluate one condition, reporting why it could not be evaluated
    pub fn try_check<R: FieldResolver + ?Sized>(&self, condition: &Condition, record: &R) -> Result<bool> {
        try_check(condition, record, self.catalog())
    }

    /// Evaluate every condition and record the outcomes.
    ///
    /// Does not short-circuit; the overall result equals `matches`.
    pub fn trace<R: FieldResolver + ?Sized>(&self, set: &FilterSet, record: &R) -> FilterTrace {
        if !record.is_valid_record() {
            return FilterTrace::invalid_record();
        }

        let groups: Vec<GroupTrace> = set
            .or_groups()
            .map(|(or_index, group)| {
                let conditions: Vec<ConditionTrace> = group
                    .iter()
                    .map(|(and_index, condition)| {
                        let outcome = self.try_check(condition, record);
                        ConditionTrace {
                            and_index,
                            field: condition.field.clone(),
                            comparator: condition.comparator.clone(),
                            value: condition.value().to_string(),
                            result: matches!(outcome, Ok(true)),
                            rejection: outcome.err().map(|err| err.to_string()),
                        }
                    })
                    .collect();

                GroupTrace {
                    or_index,
                    result: conditions.iter().all(|c| c.result),
                    conditions,
                }
            })
            .collect();

        FilterTrace {
            result: groups.iter().any(|g| g.result),
            record_valid: true,
            groups,
        }
    }
}

/// Evaluate `set` against `record` using an explicit catalog
pub fn matches<R: FieldResolver + ?Sized>(set: &FilterSet, record: &R, catalog: &FieldCatalog) -> bool {
    if !record.is_valid_record() {
        tracing::debug!("Record is not valid, filter does not match");
        return false;
    }
    set.groups().any(|group| check_and(group, record, catalog))
}

fn check_and<R: FieldResolver + ?Sized>(group: &AndGroup, record: &R, catalog: &FieldCatalog) -> bool {
    group.conditions().all(|condition| check(condition, record, catalog))
}

fn check<R: FieldResolver + ?Sized>(condition: &Condition, record: &R, catalog: &FieldCatalog) -> bool {
    match try_check(condition, record, catalog) {
        Ok(result) => {
            tracing::debug!(
                "Condition {:?} {:?} {:?}: {}",
                condition.field(),
                condition.comparator_name(),
                condition.value(),
                result
            );
            result
        }
        Err(err) => {
            tracing::debug!("Condition rejected: {}", err);
            false
        }
    }
}

fn try_check<R: FieldResolver + ?Sized>(
    condition: &Condition,
    record: &R,
    catalog: &FieldCatalog,
) -> Result<bool> {
    if !record.is_valid_record() {
        return Err(EvalError::InvalidRecord);
    }

    let field = condition.field().ok_or(EvalError::MissingField)?;
    if !catalog.contains(field) {
        return Err(EvalError::UnknownField(field.to_string()));
    }

    let kind = condition.kind().ok_or_else(|| {
        EvalError::UnknownComparator(condition.comparator_name().unwrap_or_default().to_string())
    })?;

    let operand = normalize(condition.value());

    if condition.is_tag_field() {
        return match kind {
            ComparatorKind::Has => Ok(record.has_membership(&operand)),
            ComparatorKind::NotHas => Ok(!record.has_membership(&operand)),
            _ => Err(mismatch(field, kind)),
        };
    }

    if kind.style() == ComparatorStyle::Tag {
        return Err(mismatch(field, kind));
    }

    let actual = normalize(&record.scalar_value(field));
    Ok(compare_scalar(kind, &actual, &operand))
}

fn mismatch(field: &str, kind: ComparatorKind) -> EvalError {
    EvalError::ComparatorFieldMismatch {
        field: field.to_string(),
        comparator: kind.to_string(),
    }
}
