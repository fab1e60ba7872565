//! End-to-end tests: persisted data through load/save into evaluation

mod common;

use common::{age_or_vip, contact, contact_engine, CapturedLogs};
use segment_sdk::{ComparatorKind, ContactRecord, EngineConfig, FilterEngineBuilder, FilterSet};
use serde_json::json;
use std::io::Write;

// ============================================================================
// Defaults
// ============================================================================

#[test]
fn test_empty_input_matches_every_valid_record() {
    let engine = contact_engine();
    let filter = engine.load(&json!({}));

    assert_eq!(filter, FilterSet::match_all());
    assert!(engine.evaluate(&filter, &contact(false)));
    assert!(engine.evaluate(&filter, &ContactRecord::new()));
    assert!(!engine.evaluate(&filter, &ContactRecord::invalid()));
}

#[test]
fn test_malformed_input_matches_nothing() {
    let engine = contact_engine();
    let filter = engine.load(&json!({ "0": "not-a-mapping" }));

    assert!(filter.is_empty());
    assert!(!engine.evaluate(&filter, &contact(true)));
}

#[test]
fn test_group_of_empty_conditions_matches_nothing() {
    let engine = contact_engine();
    let filter = engine.save(&json!({
        "1": { "1": { "field-name": "email", "condition": "equal", "field-value": "boss@acme.io" } },
        "2": { "1": {} }
    }));
    let stranger = ContactRecord::new().with_field("email", "nobody@else.io");

    assert_eq!(filter.len(), 1);
    assert!(!engine.evaluate(&filter, &stranger));
    assert!(engine.evaluate(&filter, &ContactRecord::new().with_field("email", "Boss@Acme.io")));
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_age_or_vip() {
    let engine = contact_engine();
    let filter = engine.load(&age_or_vip());

    assert!(engine.evaluate(&filter, &contact(true)));
    assert!(!engine.evaluate(&filter, &contact(false)));
}

#[test]
fn test_case_insensitive_email() {
    let engine = contact_engine();
    let filter = engine.save(&json!({
        "1": { "1": { "field-name": "email", "condition": "equal", "field-value": "SAM@ACME.IO" } }
    }));
    assert!(engine.evaluate(&filter, &contact(false)));
}

#[test]
fn test_computed_full_name() {
    let engine = contact_engine();
    let filter = engine.save(&json!({
        "1": { "1": { "field-name": "full_name", "condition": "contains", "field-value": "sam l" } }
    }));
    assert!(engine.evaluate(&filter, &contact(false)));
}

#[test]
fn test_excluded_field_never_matches() {
    let engine = contact_engine();
    let filter = engine.save(&json!({
        "1": { "1": { "field-name": "contact_id", "condition": "is_empty", "field-value": "" } }
    }));
    assert!(!engine.catalog().contains("contact_id"));
    assert!(!engine.evaluate(&filter, &contact(false)));
}

#[test]
fn test_legacy_stored_filter() {
    let engine = contact_engine();
    let filter = engine.load(&json!({
        "1": {
            "1": { "field-name": "owner", "condition": "equal to", "field-value": "Jordan" },
            "2": { "field-name": "tags", "condition": "does not have", "field-value": "churned" }
        }
    }));
    assert!(engine.evaluate(&filter, &contact(false)));
}

#[test]
fn test_trace_explains_failure() {
    let engine = contact_engine();
    let filter = engine.load(&json!({
        "1": {
            "1": { "field-name": "email", "condition": "has", "field-value": "vip" }
        }
    }));

    let (matched, trace) = engine.evaluate_with_trace(&filter, &contact(true));
    assert!(!matched);
    let failed: Vec<_> = trace.failed_conditions().collect();
    assert_eq!(failed.len(), 1);
    assert!(failed[0]
        .rejection
        .as_deref()
        .unwrap_or_default()
        .contains("does not apply"));
}

#[test]
fn test_tracing_config_does_not_change_results() -> anyhow::Result<()> {
    let traced = FilterEngineBuilder::new()
        .with_config(EngineConfig::new().enable_tracing(true))
        .build()?;
    let plain = FilterEngineBuilder::new().build()?;
    let filter = plain.load(&age_or_vip());

    for vip in [true, false] {
        assert_eq!(traced.evaluate(&filter, &contact(vip)), plain.evaluate(&filter, &contact(vip)));
    }
    Ok(())
}

#[test]
fn test_tracing_logs_each_condition() -> anyhow::Result<()> {
    let engine = FilterEngineBuilder::new()
        .with_fields(vec!["email".to_string()], vec![])
        .enable_tracing(true)
        .build()?;
    let filter = engine.load(&json!({
        "1": {
            "1": { "field-name": "email", "condition": "contains", "field-value": "acme" },
            "2": { "field-name": "email", "condition": "has", "field-value": "vip" }
        },
        "2": { "1": { "field-name": "age", "condition": "equal", "field-value": "25" } }
    }));

    let logs = CapturedLogs::default();
    let matched = logs.capture(|| engine.evaluate(&filter, &contact(false)));
    assert!(matched);

    let output = logs.contents();
    let lines: Vec<&str> = output
        .lines()
        .filter(|line| line.contains("Condition evaluated"))
        .collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("or_index=1") && lines[0].contains("and_index=1"));
    assert!(lines[0].contains("result=true"));
    assert!(lines[1].contains("result=false") && lines[1].contains("does not apply"));
    assert!(lines[2].contains("or_index=2") && lines[2].contains("age"));
    Ok(())
}

#[test]
fn test_no_condition_logs_without_tracing() {
    let engine = contact_engine();
    let filter = engine.load(&age_or_vip());

    let logs = CapturedLogs::default();
    logs.capture(|| engine.evaluate(&filter, &contact(true)));
    assert!(!logs.contents().contains("Condition evaluated"));
}

// ============================================================================
// Persistence and Rendering
// ============================================================================

#[test]
fn test_save_persist_load_cycle() -> anyhow::Result<()> {
    let engine = contact_engine();
    let saved = engine.save(&age_or_vip());
    let stored = engine.persist(&saved)?.to_string();

    let loaded = engine.load_json(&stored)?;
    assert_eq!(loaded, saved);
    assert!(engine.evaluate(&loaded, &contact(true)));
    Ok(())
}

#[test]
fn test_render_rows_from_loaded_filter() {
    let engine = contact_engine();
    let filter = engine.load(&age_or_vip());
    let rows = engine.render_rows("acf[field_1]", &filter);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].kind(), Some(ComparatorKind::Has));
    assert_eq!(rows[1].input_name("field-value"), "acf[field_1][2][1][field-value]");
}

#[test]
fn test_render_row_is_strict() {
    let engine = contact_engine();
    assert!(engine
        .render_row("f", "1", "1", &json!({ "field-name": "Email", "condition": "contains", "field-value": "x" }))
        .is_some());
    assert!(engine
        .render_row("f", "1", "1", &json!({ "field-name": "email", "condition": "contains", "field-value": 1 }))
        .is_none());
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_file_extends_catalog() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "extra_fields:\n  - lifetime_value\nexcluded_fields: []")?;

    let engine = FilterEngineBuilder::new()
        .with_fields(vec!["contact_id".to_string()], vec![])
        .with_config_file(file.path())
        .build()?;

    assert!(engine.catalog().contains("lifetime_value"));
    assert!(engine.catalog().contains("contact_id"));

    let filter = engine.save(&json!({
        "1": { "1": { "field-name": "lifetime_value", "condition": "equal", "field-value": "900" } }
    }));
    assert!(engine.evaluate(&filter, &ContactRecord::new().with_field("lifetime_value", "900")));
    Ok(())
}
