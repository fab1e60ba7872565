//! Field value resolver contract
//!
//! The engine never reads record attributes itself. A record type is adapted
//! to `FieldResolver`, which answers scalar lookups and tag membership.
//! Implementations should be free of side effects; the evaluator may be called
//! concurrently for different records.

/// Capability a record exposes to the evaluator
pub trait FieldResolver {
    /// Returns false if the underlying record is not a usable record.
    /// Checked before any other resolution.
    fn is_valid_record(&self) -> bool;

    /// String representation of a field, empty when absent
    fn scalar_value(&self, field: &str) -> String;

    /// Returns true if the record carries `tag`
    fn has_membership(&self, tag: &str) -> bool;
}

impl<T: FieldResolver + ?Sized> FieldResolver for &T {
    fn is_valid_record(&self) -> bool {
        (**self).is_valid_record()
    }

    fn scalar_value(&self, field: &str) -> String {
        (**self).scalar_value(field)
    }

    fn has_membership(&self, tag: &str) -> bool {
        (**self).has_membership(tag)
    }
}
