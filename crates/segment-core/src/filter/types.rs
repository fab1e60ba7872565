//! Filter model types

use crate::comparator::ComparatorKind;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;

/// Persisted key holding the field identifier
pub const FIELD_NAME_KEY: &str = "field-name";
/// Persisted key holding the comparator name
pub const CONDITION_KEY: &str = "condition";
/// Persisted key holding the comparison operand
pub const FIELD_VALUE_KEY: &str = "field-value";

/// The multi-valued pseudo-field answered through membership queries
pub const TAGS_FIELD: &str = "tags";

/// A single field comparison
///
/// The three canonical keys are optional so that a stored condition missing
/// one of them survives a load/save cycle unchanged. Any other key is kept
/// verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Condition {
    /// Field identifier (e.g., "email", "age", "tags")
    pub field: Option<String>,
    /// Comparator name as stored
    pub comparator: Option<String>,
    /// Operand
    pub value: Option<String>,
    /// Non-canonical keys
    pub extra: BTreeMap<String, String>,
}

impl Condition {
    /// Create a condition with a known comparator
    pub fn new(field: impl Into<String>, comparator: ComparatorKind, value: impl Into<String>) -> Self {
        Self::raw(field, comparator.as_str(), value)
    }

    /// Create a condition from an arbitrary comparator name
    pub fn raw(
        field: impl Into<String>,
        comparator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: Some(field.into()),
            comparator: Some(comparator.into()),
            value: Some(value.into()),
            extra: BTreeMap::new(),
        }
    }

    /// Build a condition from key/value entries. Later keys overwrite earlier ones.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut condition = Condition::default();
        for (key, value) in entries {
            condition.insert(key.into(), value.into());
        }
        condition
    }

    /// Set one key, routing the canonical keys to their typed slots
    pub fn insert(&mut self, key: String, value: String) {
        match key.as_str() {
            FIELD_NAME_KEY => self.field = Some(value),
            CONDITION_KEY => self.comparator = Some(value),
            FIELD_VALUE_KEY => self.value = Some(value),
            _ => {
                self.extra.insert(key, value);
            }
        }
    }

    /// All present entries, canonical keys first
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries = Vec::with_capacity(3 + self.extra.len());
        if let Some(field) = &self.field {
            entries.push((FIELD_NAME_KEY, field.as_str()));
        }
        if let Some(comparator) = &self.comparator {
            entries.push((CONDITION_KEY, comparator.as_str()));
        }
        if let Some(value) = &self.value {
            entries.push((FIELD_VALUE_KEY, value.as_str()));
        }
        entries.extend(self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        entries
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn comparator_name(&self) -> Option<&str> {
        self.comparator.as_deref()
    }

    /// Operand, empty when absent
    pub fn value(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }

    /// Known comparator kind, `None` when absent or unrecognized
    pub fn kind(&self) -> Option<ComparatorKind> {
        self.comparator.as_deref().and_then(ComparatorKind::parse)
    }

    /// Returns true if the condition targets the `tags` pseudo-field
    pub fn is_tag_field(&self) -> bool {
        self.field.as_deref() == Some(TAGS_FIELD)
    }

    /// Returns true if the condition carries no keys at all
    pub fn is_empty(&self) -> bool {
        self.field.is_none()
            && self.comparator.is_none()
            && self.value.is_none()
            && self.extra.is_empty()
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Conjunction of conditions keyed by their AND-index
///
/// An empty group matches every valid record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct AndGroup {
    conditions: BTreeMap<u64, Condition>,
}

impl AndGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a group from conditions, numbering them from 1
    pub fn from_conditions(conditions: Vec<Condition>) -> Self {
        conditions.into_iter().collect()
    }

    /// Insert a condition at `index`, returning the one it replaced
    pub fn insert(&mut self, index: u64, condition: Condition) -> Option<Condition> {
        self.conditions.insert(index, condition)
    }

    /// Append a condition after the highest index (1 for an empty group).
    ///
    /// When the highest index is `u64::MAX` the lowest unused index is taken.
    pub fn push(&mut self, condition: Condition) -> u64 {
        let index = match self.conditions.keys().next_back() {
            None => 1,
            Some(last) => match last.checked_add(1) {
                Some(next) => next,
                None => (0..u64::MAX)
                    .find(|i| !self.conditions.contains_key(i))
                    .unwrap_or(u64::MAX),
            },
        };
        self.conditions.insert(index, condition);
        index
    }

    pub fn get(&self, index: u64) -> Option<&Condition> {
        self.conditions.get(&index)
    }

    /// Conditions with their AND-index, in index order
    pub fn iter(&self) -> impl Iterator<Item = (u64, &Condition)> {
        self.conditions.iter().map(|(index, condition)| (*index, condition))
    }

    /// Conditions in index order
    pub fn conditions(&self) -> impl Iterator<Item = &Condition> {
        self.conditions.values()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl FromIterator<Condition> for AndGroup {
    fn from_iter<T: IntoIterator<Item = Condition>>(iter: T) -> Self {
        let mut group = AndGroup::new();
        for condition in iter {
            group.push(condition);
        }
        group
    }
}

/// The root of a filter: a disjunction of `AndGroup`s keyed by OR-index
///
/// An empty set matches nothing. Immutable once built by the sanitizer;
/// evaluation only borrows it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct FilterSet {
    groups: BTreeMap<u64, AndGroup>,
}

impl FilterSet {
    /// Create an empty set (matches nothing)
    pub fn new() -> Self {
        Self::default()
    }

    /// The canonical default: one empty OR-group at index 1 (matches every valid record)
    pub fn match_all() -> Self {
        let mut set = FilterSet::new();
        set.insert(1, AndGroup::new());
        set
    }

    /// Create a set from groups, numbering them from 1
    pub fn from_groups(groups: Vec<AndGroup>) -> Self {
        groups.into_iter().collect()
    }

    /// Insert a group at `index`, returning the one it replaced
    pub fn insert(&mut self, index: u64, group: AndGroup) -> Option<AndGroup> {
        self.groups.insert(index, group)
    }

    pub fn get(&self, index: u64) -> Option<&AndGroup> {
        self.groups.get(&index)
    }

    /// OR-groups with their index, in index order
    pub fn or_groups(&self) -> impl Iterator<Item = (u64, &AndGroup)> {
        self.groups.iter().map(|(index, group)| (*index, group))
    }

    /// Groups in index order
    pub fn groups(&self) -> impl Iterator<Item = &AndGroup> {
        self.groups.values()
    }

    /// Every condition of every group, flattened in index order
    pub fn conditions(&self) -> impl Iterator<Item = &Condition> {
        self.groups.values().flat_map(|group| group.conditions())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FromIterator<AndGroup> for FilterSet {
    fn from_iter<T: IntoIterator<Item = AndGroup>>(iter: T) -> Self {
        let mut set = FilterSet::new();
        for (position, group) in iter.into_iter().enumerate() {
            set.insert(position as u64 + 1, group);
        }
        set
    }
}
