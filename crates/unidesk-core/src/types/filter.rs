//! Filter expressions for dynamic query building.
//!
//! Requests describe their filters as a flat list of [`FilterExpr`]s,
//! each naming a registry field and a [`Comparison`]. The list is an
//! implicit conjunction. Expressions are immutable once built; the
//! compiler resolves field names against the entity registry.

use super::value::Value;

/// The comparison applied to a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    /// Exact equality.
    Equals(Value),
    /// Case-insensitive substring match.
    Contains(String),
    /// Inclusive range; either bound may be open.
    Range {
        /// Lower bound (`>=`).
        min: Option<Value>,
        /// Upper bound (`<=`).
        max: Option<Value>,
    },
    /// Membership in a set. An empty set matches nothing.
    OneOf(Vec<Value>),
}

/// A single filter condition on a named registry field.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterExpr {
    /// The registry field name, e.g. `"email"` or `"role.name"`.
    pub field: String,
    /// The comparison to apply.
    pub comparison: Comparison,
}

impl FilterExpr {
    /// Create a new filter expression.
    pub fn new(field: impl Into<String>, comparison: Comparison) -> Self {
        Self {
            field: field.into(),
            comparison,
        }
    }

    /// Shorthand for an equality filter.
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Comparison::Equals(value.into()))
    }

    /// Shorthand for a membership filter.
    pub fn one_of<V: Into<Value>>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Self::new(
            field,
            Comparison::OneOf(values.into_iter().map(Into::into).collect()),
        )
    }

    /// Equality filter that is skipped when the value is absent.
    pub fn equals_opt<V: Into<Value>>(field: &str, value: Option<V>) -> Option<Self> {
        value.map(|v| Self::equals(field, v))
    }

    /// Substring filter that is skipped when the text is absent or empty.
    pub fn contains_opt(field: &str, text: Option<&str>) -> Option<Self> {
        match text {
            Some(t) if !t.is_empty() => Some(Self::new(field, Comparison::Contains(t.to_string()))),
            _ => None,
        }
    }

    /// Range filter that is skipped when both bounds are absent.
    pub fn range_opt<V: Into<Value>>(field: &str, min: Option<V>, max: Option<V>) -> Option<Self> {
        if min.is_none() && max.is_none() {
            return None;
        }
        Some(Self::new(
            field,
            Comparison::Range {
                min: min.map(Into::into),
                max: max.map(Into::into),
            },
        ))
    }
}
