//! Honor requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use unidesk_core::AppResult;
use unidesk_core::query::{GetRequest, ListParams};
use unidesk_core::traits::{UpdateRequest, WriteRequest};
use unidesk_core::types::{FilterExpr, Value, WriteValues};

use crate::validation::{require_text, require_text_opt};

/// List honors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetHonors {
    /// Paging, projection, sort and visibility.
    #[serde(flatten)]
    pub params: ListParams,
    /// Substring of the title.
    pub title: Option<String>,
    /// Substring of the awarding body.
    pub awarded_by: Option<String>,
    /// Holding teacher.
    pub teacher_id: Option<i64>,
    /// Awarded on or after.
    pub awarded_on_more: Option<NaiveDate>,
    /// Awarded on or before.
    pub awarded_on_less: Option<NaiveDate>,
}

impl GetRequest for GetHonors {
    fn params(&self) -> &ListParams {
        &self.params
    }

    fn filters(&self) -> Vec<FilterExpr> {
        [
            FilterExpr::contains_opt("title", self.title.as_deref()),
            FilterExpr::contains_opt("awardedBy", self.awarded_by.as_deref()),
            FilterExpr::equals_opt("teacherId", self.teacher_id),
            FilterExpr::range_opt("awardedOn", self.awarded_on_more, self.awarded_on_less),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Create an honor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHonor {
    /// Title of the award.
    pub title: String,
    /// Awarding body.
    pub awarded_by: Option<String>,
    /// Award date.
    pub awarded_on: Option<NaiveDate>,
    /// Holding teacher.
    pub teacher_id: i64,
}

impl WriteRequest for CreateHonor {
    fn values(&self) -> Vec<(&'static str, Value)> {
        WriteValues::new()
            .set("title", self.title.as_str())
            .set_opt("awardedBy", self.awarded_by.clone())
            .set_opt("awardedOn", self.awarded_on)
            .set("teacherId", self.teacher_id)
            .into_vec()
    }

    fn validate(&self) -> AppResult<()> {
        require_text("title", &self.title)
    }
}

/// Update an honor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHonor {
    /// Honor id.
    pub id: i64,
    /// Guid the caller last read.
    pub guid: String,
    /// New title.
    pub title: Option<String>,
    /// New awarding body.
    pub awarded_by: Option<String>,
    /// New award date.
    pub awarded_on: Option<NaiveDate>,
    /// New holding teacher.
    pub teacher_id: Option<i64>,
}

impl WriteRequest for UpdateHonor {
    fn values(&self) -> Vec<(&'static str, Value)> {
        WriteValues::new()
            .set_opt("title", self.title.clone())
            .set_opt("awardedBy", self.awarded_by.clone())
            .set_opt("awardedOn", self.awarded_on)
            .set_opt("teacherId", self.teacher_id)
            .into_vec()
    }

    fn validate(&self) -> AppResult<()> {
        require_text_opt("title", self.title.as_deref())
    }
}

impl UpdateRequest for UpdateHonor {
    fn id(&self) -> i64 {
        self.id
    }

    fn guid(&self) -> &str {
        &self.guid
    }
}
