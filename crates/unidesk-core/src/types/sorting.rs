//! Sorting types for list queries.

use serde::{Deserialize, Serialize};

/// Field used when a request does not name one.
pub const DEFAULT_SORT_FIELD: &str = "id";

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Return the SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A sort specification consisting of a field name and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    /// Registry field name to sort by.
    pub field: String,
    /// Sort direction.
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortField {
    /// Create a new sort field.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Create an ascending sort on the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    /// Create a descending sort on the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    /// Build from the `orderField` / `isDesc` request pair.
    ///
    /// Without an `orderField` the sort is `id` ascending, whatever `isDesc` says.
    pub fn from_request(order_field: Option<&str>, is_desc: Option<bool>) -> Self {
        match order_field {
            Some(field) if !field.is_empty() => {
                let direction = if is_desc.unwrap_or(false) {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                };
                Self::new(field, direction)
            }
            _ => Self::asc(DEFAULT_SORT_FIELD),
        }
    }
}

impl Default for SortField {
    fn default() -> Self {
        Self::asc(DEFAULT_SORT_FIELD)
    }
}
