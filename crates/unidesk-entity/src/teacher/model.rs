//! Teacher row model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::relations::Reference;

/// A teacher as returned by list queries; only selected fields are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherRow {
    /// Row id.
    pub id: Option<i64>,
    /// Concurrency token.
    pub guid: Option<String>,
    /// Soft-delete flag.
    pub is_deleted: Option<bool>,
    /// Full name.
    pub name: Option<String>,
    /// Academic title.
    pub title: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Owning department id.
    pub department_id: Option<i64>,
    /// Linked user id.
    pub user_id: Option<i64>,
    /// Hiring date.
    pub hired_on: Option<NaiveDate>,
    /// Joined department.
    pub department: Option<Reference>,
    /// Joined user account.
    pub user: Option<Reference>,
}
