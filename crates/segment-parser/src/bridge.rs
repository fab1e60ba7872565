//! Load/save entry points between the persisted representation and `FilterSet`
//!
//! Both directions share the bulk sanitizer and differ only in the escaping
//! transform. Empty input maps to the match-everything default so that an
//! unconfigured filter does not exclude every record.

use crate::error::Result;
use crate::escape::Escape;
use crate::sanitizer::sanitize;
use segment_core::FilterSet;
use serde_json::Value;

/// Build a `FilterSet` from stored data for display
pub fn on_load(raw: &Value) -> FilterSet {
    if is_empty_input(raw) {
        return FilterSet::match_all();
    }
    sanitize(raw, Escape::Display)
}

/// Build a `FilterSet` from submitted data for storage
pub fn on_save(raw: &Value) -> FilterSet {
    if is_empty_input(raw) {
        return FilterSet::match_all();
    }
    sanitize(raw, Escape::Storage)
}

/// Parse stored JSON text and load it
pub fn load_json(json: &str) -> Result<FilterSet> {
    let raw: Value = serde_json::from_str(json)?;
    Ok(on_load(&raw))
}

/// Encode a `FilterSet` into its persisted JSON form
pub fn to_persisted(set: &FilterSet) -> Result<Value> {
    Ok(serde_json::to_value(set)?)
}

fn is_empty_input(raw: &Value) -> bool {
    match raw {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_input_defaults_to_match_all() {
        assert_eq!(on_load(&json!({})), FilterSet::match_all());
        assert_eq!(on_load(&Value::Null), FilterSet::match_all());
        assert_eq!(on_save(&json!([])), FilterSet::match_all());
    }

    #[test]
    fn test_default_round_trips() {
        let persisted = to_persisted(&FilterSet::match_all()).unwrap();
        assert_eq!(persisted, json!({ "1": {} }));
        assert_eq!(on_load(&persisted), FilterSet::match_all());
    }

    #[test]
    fn test_load_and_save_escape_differently() {
        let raw = json!({ "1": { "1": { "field-name": "note", "condition": "contains", "field-value": "<b>x</b>" } } });

        let loaded = on_load(&raw);
        let saved = on_save(&raw);

        assert_eq!(loaded.conditions().next().map(|c| c.value()), Some("&lt;b&gt;x&lt;/b&gt;"));
        assert_eq!(saved.conditions().next().map(|c| c.value()), Some("x"));
    }

    #[test]
    fn test_load_json_rejects_invalid_text() {
        assert!(load_json("{ not json").is_err());
        assert_eq!(load_json("{}").unwrap(), FilterSet::match_all());
    }
}
