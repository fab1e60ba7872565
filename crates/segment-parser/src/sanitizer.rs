//! Bulk condition sanitizer
//!
//! Normalizes an untrusted nested structure
//! `{ or_index: { and_index: { key: value } } }` into a `FilterSet`.
//!
//! The sanitizer checks shape only. A non-mapping at any of the three levels
//! rejects the whole structure, leaving an empty set. Field names and
//! comparators are not validated here; the evaluator does that.

use crate::error::{type_name, ParseError, Result};
use crate::escape::Escape;
use segment_core::{AndGroup, Condition, FilterSet};
use serde_json::Value;

/// Sanitize `raw`, returning an empty `FilterSet` on any shape error
pub fn sanitize(raw: &Value, escape: Escape) -> FilterSet {
    match try_sanitize(raw, escape) {
        Ok(set) => set,
        Err(err) => {
            log::warn!("Discarding filter set: {}", err);
            FilterSet::new()
        }
    }
}

/// Sanitize `raw`, reporting the first shape error
pub fn try_sanitize(raw: &Value, escape: Escape) -> Result<FilterSet> {
    let mut set = FilterSet::new();

    for (or_key, or_block) in mapping_entries(raw, "root")? {
        let or_index = coerce_index(&or_key);
        let mut group = AndGroup::new();
        let and_entries = mapping_entries(or_block, &or_key)?;
        let had_entries = !and_entries.is_empty();

        for (and_key, and_condition) in and_entries {
            let path = format!("{}.{}", or_key, and_key);
            let condition = sanitize_condition(and_condition, escape, &path)?;

            // an empty mapping produces no condition
            if !condition.is_empty() {
                group.insert(coerce_index(&and_key), condition);
            }
        }

        // only a group that is empty at the source matches everything
        if had_entries && group.is_empty() {
            log::debug!("Dropping OR-group {}: no conditions", or_key);
            continue;
        }
        set.insert(or_index, group);
    }

    Ok(set)
}

fn sanitize_condition(raw: &Value, escape: Escape, path: &str) -> Result<Condition> {
    let mut condition = Condition::default();
    for (key, value) in mapping_entries(raw, path)? {
        let text = scalar_text(value).ok_or_else(|| ParseError::Shape {
            path: format!("{}.{}", path, key),
            expected: "scalar",
            actual: type_name(value),
        })?;
        condition.insert(escape.apply(&key), escape.apply(&text));
    }
    Ok(condition)
}

/// Entries of an object, or of an array keyed by position
fn mapping_entries<'a>(value: &'a Value, path: &str) -> Result<Vec<(String, &'a Value)>> {
    match value {
        Value::Object(map) => Ok(map.iter().map(|(k, v)| (k.clone(), v)).collect()),
        Value::Array(items) => Ok(items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect()),
        other => Err(ParseError::Shape {
            path: path.to_string(),
            expected: "mapping",
            actual: type_name(other),
        }),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) | Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Coerce an index key to a non-negative integer.
///
/// Leading whitespace is skipped and the leading run of digits is used
/// (`"12abc"` is 12). Negative and non-numeric keys become 0. Values past
/// `u64::MAX` saturate.
pub fn coerce_index(key: &str) -> u64 {
    let trimmed = key.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut index: u64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        index = index.saturating_mul(10).saturating_add(u64::from(byte - b'0'));
    }

    if negative {
        0
    } else {
        index
    }
}
