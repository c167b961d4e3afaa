//! Soft-delete states and query visibility.
//!
//! Rows are never physically removed. A row is either live, deleted
//! directly through the concurrency gate, or deleted as a side effect of
//! a parent deletion (tagged with the cascade reason). No state ever
//! returns to [`DeletionState::Live`].

use serde::{Deserialize, Serialize};

/// The soft-delete state of a single row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeletionState {
    /// Visible by default.
    Live,
    /// Deleted by an explicit delete call.
    DeletedDirect,
    /// Deleted because a parent row was deleted.
    DeletedCascade(String),
}

impl DeletionState {
    /// Derive the state from the stored flag and cascade tag.
    pub fn from_flags(is_deleted: bool, cascade_deleted_by: Option<&str>) -> Self {
        match (is_deleted, cascade_deleted_by) {
            (false, _) => Self::Live,
            (true, Some(reason)) => Self::DeletedCascade(reason.to_string()),
            (true, None) => Self::DeletedDirect,
        }
    }

    /// Whether the row is deleted in any way.
    pub fn is_deleted(&self) -> bool {
        !matches!(self, Self::Live)
    }

    /// Whether a transition to `next` is allowed.
    pub fn can_transition_to(&self, next: &DeletionState) -> bool {
        matches!(self, Self::Live) && next.is_deleted()
    }
}

/// Which deletion states a list query returns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Only live rows.
    #[default]
    Live,
    /// Live and deleted rows alike.
    All,
    /// Only rows cascade-deleted for the given reason.
    CascadeDeleted(String),
}

impl Visibility {
    /// Resolve from the `showDeleted` flag and optional cascade selector.
    ///
    /// A non-empty cascade selector wins over `showDeleted`.
    pub fn from_request(show_deleted: Option<bool>, cascade_reason: Option<&str>) -> Self {
        match cascade_reason {
            Some(reason) if !reason.is_empty() => Self::CascadeDeleted(reason.to_string()),
            _ if show_deleted.unwrap_or(false) => Self::All,
            _ => Self::Live,
        }
    }

    /// Whether a row in `state` is visible.
    pub fn admits(&self, state: &DeletionState) -> bool {
        match (self, state) {
            (Self::All, _) => true,
            (Self::Live, DeletionState::Live) => true,
            (Self::CascadeDeleted(wanted), DeletionState::DeletedCascade(reason)) => {
                wanted == reason
            }
            _ => false,
        }
    }
}
