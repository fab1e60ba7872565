//! Evaluation traces
//!
//! A trace records the outcome of every condition of every OR-group, with the
//! rejection reason when a condition could not be evaluated.

use serde::Serialize;

/// Outcome of one condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionTrace {
    pub and_index: u64,
    pub field: Option<String>,
    pub comparator: Option<String>,
    pub value: String,
    pub result: bool,
    /// Why the condition was rejected, if it was
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<String>,
}

/// Outcome of one AND-group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupTrace {
    pub or_index: u64,
    pub result: bool,
    pub conditions: Vec<ConditionTrace>,
}

/// Outcome of a whole filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterTrace {
    pub result: bool,
    pub record_valid: bool,
    pub groups: Vec<GroupTrace>,
}

impl FilterTrace {
    /// Trace for a record that failed the validity guard
    pub fn invalid_record() -> Self {
        Self {
            result: false,
            record_valid: false,
            groups: Vec::new(),
        }
    }

    /// Conditions that evaluated to false, across all groups
    pub fn failed_conditions(&self) -> impl Iterator<Item = &ConditionTrace> {
        self.groups
            .iter()
            .flat_map(|group| group.conditions.iter())
            .filter(|condition| !condition.result)
    }

    /// OR-indices of the groups that matched
    pub fn matched_groups(&self) -> Vec<u64> {
        self.groups
            .iter()
            .filter(|group| group.result)
            .map(|group| group.or_index)
            .collect()
    }
}
