//! Comparator registry
//!
//! Enumerates the comparison operators a condition may use. Every comparator
//! carries a display label and a style tag. The style tag only drives which
//! options a form shows for a field; evaluation semantics live in the runtime.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison operators supported in conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparatorKind {
    /// Case-insensitive equality
    Equal,
    /// Negated equality
    NotEqual,
    /// Substring test
    Contains,
    /// Negated substring test
    NotContains,
    /// Resolved value is empty (operand ignored)
    IsEmpty,
    /// Resolved value is not empty (operand ignored)
    IsNotEmpty,
    /// Record carries the tag
    Has,
    /// Record lacks the tag
    NotHas,
}

/// Which family of fields a comparator applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparatorStyle {
    /// Applies to any non-tag field
    Scalar,
    /// Applies only to the multi-valued `tags` field
    Tag,
}

impl ComparatorStyle {
    /// CSS class the form uses to show or hide options of this style
    pub fn css_class(&self) -> &'static str {
        match self {
            ComparatorStyle::Scalar => "meta-field-options",
            ComparatorStyle::Tag => "tag-options",
        }
    }
}

impl ComparatorKind {
    /// Every comparator, in the order a form lists them
    pub const ALL: [ComparatorKind; 8] = [
        ComparatorKind::Equal,
        ComparatorKind::NotEqual,
        ComparatorKind::Contains,
        ComparatorKind::NotContains,
        ComparatorKind::IsEmpty,
        ComparatorKind::IsNotEmpty,
        ComparatorKind::Has,
        ComparatorKind::NotHas,
    ];

    /// Parse a comparator name.
    ///
    /// Accepts the canonical snake_case names as well as the legacy labels
    /// stored by older forms (`equal to`, `does not contain`, ...).
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "equal" | "equal to" => Some(ComparatorKind::Equal),
            "not_equal" | "not equal to" => Some(ComparatorKind::NotEqual),
            "contains" => Some(ComparatorKind::Contains),
            "not_contains" | "does not contain" => Some(ComparatorKind::NotContains),
            "is_empty" | "is empty" => Some(ComparatorKind::IsEmpty),
            "is_not_empty" | "is not empty" => Some(ComparatorKind::IsNotEmpty),
            "has" => Some(ComparatorKind::Has),
            "not_has" | "does not have" => Some(ComparatorKind::NotHas),
            _ => None,
        }
    }

    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparatorKind::Equal => "equal",
            ComparatorKind::NotEqual => "not_equal",
            ComparatorKind::Contains => "contains",
            ComparatorKind::NotContains => "not_contains",
            ComparatorKind::IsEmpty => "is_empty",
            ComparatorKind::IsNotEmpty => "is_not_empty",
            ComparatorKind::Has => "has",
            ComparatorKind::NotHas => "not_has",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            ComparatorKind::Equal => "Equal",
            ComparatorKind::NotEqual => "Not equal",
            ComparatorKind::Contains => "Contains",
            ComparatorKind::NotContains => "Does not contain",
            ComparatorKind::IsEmpty => "Is empty",
            ComparatorKind::IsNotEmpty => "Is not empty",
            ComparatorKind::Has => "Include",
            ComparatorKind::NotHas => "Does not include",
        }
    }

    pub fn style(&self) -> ComparatorStyle {
        match self {
            ComparatorKind::Has | ComparatorKind::NotHas => ComparatorStyle::Tag,
            _ => ComparatorStyle::Scalar,
        }
    }

    /// Returns true if the comparator ignores the condition's value operand
    pub fn ignores_operand(&self) -> bool {
        matches!(self, ComparatorKind::IsEmpty | ComparatorKind::IsNotEmpty)
    }
}

impl fmt::Display for ComparatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComparatorKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComparatorKind::parse(s).ok_or_else(|| CoreError::UnknownComparator(s.to_string()))
    }
}

/// Returns true if `name` is a known comparator name (canonical or legacy)
pub fn is_known(name: &str) -> bool {
    ComparatorKind::parse(name).is_some()
}

/// Style of a comparator name, or `None` when the name is unknown
pub fn style_of(name: &str) -> Option<ComparatorStyle> {
    ComparatorKind::parse(name).map(|kind| kind.style())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        for kind in ComparatorKind::ALL {
            assert_eq!(ComparatorKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_parse_legacy_labels() {
        assert_eq!(ComparatorKind::parse("equal to"), Some(ComparatorKind::Equal));
        assert_eq!(ComparatorKind::parse("not equal to"), Some(ComparatorKind::NotEqual));
        assert_eq!(ComparatorKind::parse("does not contain"), Some(ComparatorKind::NotContains));
        assert_eq!(ComparatorKind::parse("is empty"), Some(ComparatorKind::IsEmpty));
        assert_eq!(ComparatorKind::parse("is not empty"), Some(ComparatorKind::IsNotEmpty));
        assert_eq!(ComparatorKind::parse("does not have"), Some(ComparatorKind::NotHas));
    }

    #[test]
    fn test_unknown_names() {
        assert!(!is_known("greater_than"));
        assert!(!is_known(""));
        assert!(!is_known("Equal"));
        assert_eq!(style_of("starts_with"), None);
    }

    #[test]
    fn test_styles() {
        assert_eq!(style_of("has"), Some(ComparatorStyle::Tag));
        assert_eq!(style_of("does not have"), Some(ComparatorStyle::Tag));
        assert_eq!(style_of("contains"), Some(ComparatorStyle::Scalar));
        assert_eq!(ComparatorStyle::Tag.css_class(), "tag-options");
        assert_eq!(ComparatorStyle::Scalar.css_class(), "meta-field-options");
    }

    #[test]
    fn test_from_str_error() {
        let err = "between".parse::<ComparatorKind>().unwrap_err();
        assert_eq!(err, CoreError::UnknownComparator("between".to_string()));
        assert!(err.to_string().contains("between"));
    }

    #[test]
    fn test_labels_and_operand() {
        assert_eq!(ComparatorKind::Has.label(), "Include");
        assert_eq!(ComparatorKind::NotHas.label(), "Does not include");
        assert!(ComparatorKind::IsEmpty.ignores_operand());
        assert!(!ComparatorKind::Contains.ignores_operand());
    }

    #[test]
    fn test_serde_uses_canonical_names() {
        let json = serde_json::to_string(&ComparatorKind::NotContains).unwrap();
        assert_eq!(json, "\"not_contains\"");
        let kind: ComparatorKind = serde_json::from_str("\"is_not_empty\"").unwrap();
        assert_eq!(kind, ComparatorKind::IsNotEmpty);
    }
}
