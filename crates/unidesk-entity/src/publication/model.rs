//! Publication row model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::relations::Reference;

/// A publication as returned by list queries; only selected fields are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationRow {
    /// Row id.
    pub id: Option<i64>,
    /// Concurrency token.
    pub guid: Option<String>,
    /// Soft-delete flag.
    pub is_deleted: Option<bool>,
    /// Title.
    pub title: Option<String>,
    /// Journal or conference.
    pub venue: Option<String>,
    /// Publication date.
    pub published_on: Option<NaiveDate>,
    /// Citation count.
    pub citations: Option<i64>,
    /// Authoring teacher id.
    pub teacher_id: Option<i64>,
    /// Joined teacher.
    pub teacher: Option<Reference>,
}
