//! Common test utilities for SDK integration tests

use segment_sdk::{ContactRecord, FilterEngine, FilterEngineBuilder};
use serde_json::{json, Value};

/// Engine over a typical contact catalog
pub fn contact_engine() -> FilterEngine {
    FilterEngineBuilder::new()
        .with_fields(
            vec![
                "contact_id".to_string(),
                "first_name".to_string(),
                "last_name".to_string(),
                "full_name".to_string(),
                "email".to_string(),
                "optin_status".to_string(),
                "city".to_string(),
            ],
            vec!["plan".to_string(), "company".to_string()],
        )
        .build()
        .expect("engine builds")
}

/// Contact aged 25, optionally tagged `vip`
pub fn contact(vip: bool) -> ContactRecord {
    let record = ContactRecord::new()
        .with_field("first_name", "Sam")
        .with_field("last_name", "Lee")
        .with_field("email", "sam@acme.io")
        .with_field("age", "25")
        .with_field("owner", "jordan");
    if vip {
        record.with_tag("vip")
    } else {
        record
    }
}

/// Persisted filter: age equal 30 OR tagged vip
pub fn age_or_vip() -> Value {
    json!({
        "1": { "1": { "field-name": "age", "condition": "equal", "field-value": "30" } },
        "2": { "1": { "field-name": "tags", "condition": "has", "field-value": "vip" } }
    })
}

/// Log output captured from a scoped subscriber
#[derive(Clone, Default)]
pub struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Run `f` with debug-level logging written into this buffer
    pub fn capture<T>(&self, f: impl FnOnce() -> T) -> T {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .without_time()
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn contents(&self) -> String {
        let bytes = self.0.lock().map(|buf| buf.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(mut inner) = self.0.lock() {
            inner.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
