//! Field catalog
//!
//! The set of field identifiers a condition may reference. The catalog is only
//! a whitelist for evaluation; sanitizing stored filters ignores it so that a
//! field removed from the catalog does not erase saved conditions.

use crate::filter::TAGS_FIELD;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Source of field identifiers
pub trait FieldCatalogProvider: Send + Sync {
    /// Attribute-style fields, computed properties and pseudo-fields
    fn list_fields(&self) -> Vec<String>;
}

/// How raw field lists are combined into a catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogOptions {
    /// Fields never exposed to conditions
    pub excluded_fields: Vec<String>,
    /// Literal fields appended after the attribute and property fields
    pub pseudo_fields: Vec<String>,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            excluded_fields: vec!["contact_id".to_string()],
            pseudo_fields: vec!["owner".to_string(), TAGS_FIELD.to_string(), "age".to_string()],
        }
    }
}

/// Ordered, duplicate-free set of field identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldCatalog {
    fields: Vec<String>,
    lookup: HashSet<String>,
}

impl FieldCatalog {
    /// Build a catalog, keeping the first occurrence of each field
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = FieldCatalog::default();
        for field in fields {
            let field = field.into();
            if catalog.lookup.insert(field.clone()) {
                catalog.fields.push(field);
            }
        }
        catalog
    }

    /// Combine attribute fields and property names into a catalog:
    /// drop excluded fields, append pseudo-fields, remove duplicates.
    pub fn assemble<A, P>(attribute_fields: A, property_fields: P, options: &CatalogOptions) -> Self
    where
        A: IntoIterator<Item = String>,
        P: IntoIterator<Item = String>,
    {
        let attributes = attribute_fields
            .into_iter()
            .filter(|field| !options.excluded_fields.contains(field));

        let catalog = FieldCatalog::new(
            attributes
                .chain(property_fields)
                .chain(options.pseudo_fields.iter().cloned()),
        );
        log::debug!("assembled field catalog with {} fields", catalog.len());
        catalog
    }

    pub fn contains(&self, field: &str) -> bool {
        self.lookup.contains(field)
    }

    /// Fields in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FieldCatalogProvider for FieldCatalog {
    fn list_fields(&self) -> Vec<String> {
        self.fields.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_dedupes_in_order() {
        let catalog = FieldCatalog::new(["email", "age", "email", "owner"]);
        assert_eq!(catalog.iter().collect::<Vec<_>>(), vec!["email", "age", "owner"]);
        assert!(catalog.contains("age"));
        assert!(!catalog.contains("tags"));
    }

    #[test]
    fn test_assemble_defaults() {
        let catalog = FieldCatalog::assemble(
            strings(&["contact_id", "first_name", "email", "city"]),
            strings(&["favourite_color", "email"]),
            &CatalogOptions::default(),
        );

        assert_eq!(
            catalog.iter().collect::<Vec<_>>(),
            vec!["first_name", "email", "city", "favourite_color", "owner", "tags", "age"]
        );
        assert!(!catalog.contains("contact_id"));
    }

    #[test]
    fn test_assemble_exclusion_only_applies_to_attributes() {
        let options = CatalogOptions {
            excluded_fields: strings(&["secret"]),
            pseudo_fields: vec![],
        };
        let catalog = FieldCatalog::assemble(strings(&["secret", "email"]), strings(&["secret"]), &options);
        assert_eq!(catalog.iter().collect::<Vec<_>>(), vec!["email", "secret"]);
    }
}
