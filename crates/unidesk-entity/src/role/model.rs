//! Role row model.

use serde::{Deserialize, Serialize};

/// A role as returned by list queries; only selected fields are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRow {
    /// Row id.
    pub id: Option<i64>,
    /// Concurrency token.
    pub guid: Option<String>,
    /// Soft-delete flag.
    pub is_deleted: Option<bool>,
    /// Role name.
    pub name: Option<String>,
    /// Description.
    pub description: Option<String>,
}
