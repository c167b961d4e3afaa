//! Honor row model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::relations::Reference;

/// An honor as returned by list queries; only selected fields are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HonorRow {
    /// Row id.
    pub id: Option<i64>,
    /// Concurrency token.
    pub guid: Option<String>,
    /// Soft-delete flag.
    pub is_deleted: Option<bool>,
    /// Parent deletion that removed this honor, if any.
    pub cascade_deleted_by: Option<String>,
    /// Title of the award.
    pub title: Option<String>,
    /// Awarding body.
    pub awarded_by: Option<String>,
    /// Award date.
    pub awarded_on: Option<NaiveDate>,
    /// Holding teacher id.
    pub teacher_id: Option<i64>,
    /// Joined teacher.
    pub teacher: Option<Reference>,
}
