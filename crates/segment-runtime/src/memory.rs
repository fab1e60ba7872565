//! In-memory adapters
//!
//! `ContactRecord` is a plain contact implementing `FieldResolver`, and
//! `ContactFieldSource` assembles a catalog from attribute and property lists.
//! Both are used by tests and by callers that already hold contact data.

use segment_core::{CatalogOptions, FieldCatalog, FieldCatalogProvider, FieldResolver, TAGS_FIELD};
use std::collections::{HashMap, HashSet};

/// Contact held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRecord {
    valid: bool,
    fields: HashMap<String, String>,
    tags: HashSet<String>,
}

impl Default for ContactRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactRecord {
    /// Create an empty, valid contact
    pub fn new() -> Self {
        Self {
            valid: true,
            fields: HashMap::new(),
            tags: HashSet::new(),
        }
    }

    /// A record that fails the validity guard
    pub fn invalid() -> Self {
        Self {
            valid: false,
            ..Self::new()
        }
    }

    /// Set a scalar field (`email`, `owner`, `optin_status`, any meta key)
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Add a tag. Tags are matched case-insensitively.
    pub fn with_tag(mut self, tag: impl AsRef<str>) -> Self {
        self.tags.insert(tag.as_ref().trim().to_lowercase());
        self
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    fn full_name(&self) -> String {
        let first = self.fields.get("first_name").map(String::as_str).unwrap_or_default();
        let last = self.fields.get("last_name").map(String::as_str).unwrap_or_default();
        format!("{} {}", first, last).trim().to_string()
    }
}

impl FieldResolver for ContactRecord {
    fn is_valid_record(&self) -> bool {
        self.valid
    }

    fn scalar_value(&self, field: &str) -> String {
        if !self.valid {
            return String::new();
        }

        match field {
            // tags are only answered through membership
            TAGS_FIELD => String::new(),
            "full_name" => match self.fields.get(field) {
                Some(name) => name.clone(),
                None => self.full_name(),
            },
            _ => self.fields.get(field).cloned().unwrap_or_default(),
        }
    }

    fn has_membership(&self, tag: &str) -> bool {
        self.valid && self.tags.contains(&tag.trim().to_lowercase())
    }
}

/// Catalog provider assembling attribute and property field lists
#[derive(Debug, Clone, Default)]
pub struct ContactFieldSource {
    pub attribute_fields: Vec<String>,
    pub property_fields: Vec<String>,
    pub options: CatalogOptions,
}

impl ContactFieldSource {
    pub fn new(attribute_fields: Vec<String>, property_fields: Vec<String>) -> Self {
        Self {
            attribute_fields,
            property_fields,
            options: CatalogOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CatalogOptions) -> Self {
        self.options = options;
        self
    }
}

impl FieldCatalogProvider for ContactFieldSource {
    fn list_fields(&self) -> Vec<String> {
        FieldCatalog::assemble(
            self.attribute_fields.iter().cloned(),
            self.property_fields.iter().cloned(),
            &self.options,
        )
        .list_fields()
    }
}
