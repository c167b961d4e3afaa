//! Department row model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A department as returned by list queries; only selected fields are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRow {
    /// Row id.
    pub id: Option<i64>,
    /// Concurrency token.
    pub guid: Option<String>,
    /// Soft-delete flag.
    pub is_deleted: Option<bool>,
    /// Department name.
    pub name: Option<String>,
    /// Short code.
    pub code: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Founding date.
    pub founded_on: Option<NaiveDate>,
}
