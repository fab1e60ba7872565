//! Scalar comparator semantics

use segment_core::ComparatorKind;
use segment_parser::sanitize_text;

/// Prepare a string for case-insensitive comparison: lower-case, then
/// reduce to storage-safe text (which also trims).
pub fn normalize(input: &str) -> String {
    sanitize_text(&input.to_lowercase())
}

/// Apply a scalar comparator to already normalized strings.
///
/// Tag comparators never match here.
pub fn compare_scalar(kind: ComparatorKind, actual: &str, operand: &str) -> bool {
    match kind {
        ComparatorKind::Equal => actual == operand,
        ComparatorKind::NotEqual => actual != operand,
        ComparatorKind::Contains => actual.contains(operand),
        ComparatorKind::NotContains => !actual.contains(operand),
        ComparatorKind::IsEmpty => actual.is_empty(),
        ComparatorKind::IsNotEmpty => !actual.is_empty(),
        ComparatorKind::Has | ComparatorKind::NotHas => false,
    }
}
