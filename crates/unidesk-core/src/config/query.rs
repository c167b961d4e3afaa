//! Query engine configuration.

use serde::{Deserialize, Serialize};

/// How unknown names in `select` / `orderField` are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFieldPolicy {
    /// Fail the request with a `VALIDATION` error.
    #[default]
    Reject,
    /// Drop the name silently.
    Ignore,
}

/// Error reported when a delete carries a stale guid.
///
/// Updates always report `GUID_CHANGED`. Deletes historically reported
/// `ALREADY_DELETED` for the same condition; both behaviors are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuidMismatchPolicy {
    /// Report `ALREADY_DELETED`.
    #[default]
    AlreadyDeleted,
    /// Report `GUID_CHANGED`, same as the update path.
    GuidChanged,
}

/// Query and mutation behavior shared by every entity repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Page size used when a request does not carry one.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    /// Policy for unknown `select` and `orderField` names.
    #[serde(default)]
    pub unknown_fields: UnknownFieldPolicy,
    /// Error kind for stale guids on the delete path.
    #[serde(default)]
    pub delete_guid_mismatch: GuidMismatchPolicy,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            unknown_fields: UnknownFieldPolicy::default(),
            delete_guid_mismatch: GuidMismatchPolicy::default(),
        }
    }
}

fn default_page_size() -> u64 {
    5
}
