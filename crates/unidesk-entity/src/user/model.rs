//! User row model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::relations::Reference;

/// A user as returned by list queries; only selected fields are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    /// Row id.
    pub id: Option<i64>,
    /// Concurrency token.
    pub guid: Option<String>,
    /// Soft-delete flag.
    pub is_deleted: Option<bool>,
    /// Display name.
    pub name: Option<String>,
    /// Login email.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Assigned role id.
    pub role_id: Option<i64>,
    /// Date the account was opened.
    pub joined_on: Option<NaiveDate>,
    /// Joined role.
    pub role: Option<Reference>,
}
