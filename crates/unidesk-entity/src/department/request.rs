//! Department requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use unidesk_core::AppResult;
use unidesk_core::query::{GetRequest, ListParams};
use unidesk_core::traits::{UpdateRequest, WriteRequest};
use unidesk_core::types::{FilterExpr, Value, WriteValues};

use crate::validation::{require_text, require_text_opt};

/// List departments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetDepartments {
    /// Paging, projection, sort and visibility.
    #[serde(flatten)]
    pub params: ListParams,
    /// Substring of the name.
    pub name: Option<String>,
    /// Exact department code.
    pub code_equal: Option<String>,
    /// Founded on or after.
    pub founded_on_more: Option<NaiveDate>,
    /// Founded on or before.
    pub founded_on_less: Option<NaiveDate>,
}

impl GetRequest for GetDepartments {
    fn params(&self) -> &ListParams {
        &self.params
    }

    fn filters(&self) -> Vec<FilterExpr> {
        [
            FilterExpr::contains_opt("name", self.name.as_deref()),
            FilterExpr::equals_opt("code", self.code_equal.clone()),
            FilterExpr::range_opt("foundedOn", self.founded_on_more, self.founded_on_less),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Create a department.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepartment {
    /// Department name.
    pub name: String,
    /// Short code, e.g. `CS`.
    pub code: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Founding date.
    pub founded_on: Option<NaiveDate>,
}

impl WriteRequest for CreateDepartment {
    fn values(&self) -> Vec<(&'static str, Value)> {
        WriteValues::new()
            .set("name", self.name.as_str())
            .set("code", self.code.as_str())
            .set_opt("description", self.description.clone())
            .set_opt("foundedOn", self.founded_on)
            .into_vec()
    }

    fn validate(&self) -> AppResult<()> {
        require_text("name", &self.name)?;
        require_text("code", &self.code)
    }
}

/// Update a department.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDepartment {
    /// Department id.
    pub id: i64,
    /// Guid the caller last read.
    pub guid: String,
    /// New name.
    pub name: Option<String>,
    /// New code.
    pub code: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New founding date.
    pub founded_on: Option<NaiveDate>,
}

impl WriteRequest for UpdateDepartment {
    fn values(&self) -> Vec<(&'static str, Value)> {
        WriteValues::new()
            .set_opt("name", self.name.clone())
            .set_opt("code", self.code.clone())
            .set_opt("description", self.description.clone())
            .set_opt("foundedOn", self.founded_on)
            .into_vec()
    }

    fn validate(&self) -> AppResult<()> {
        require_text_opt("name", self.name.as_deref())?;
        require_text_opt("code", self.code.as_deref())
    }
}

impl UpdateRequest for UpdateDepartment {
    fn id(&self) -> i64 {
        self.id
    }

    fn guid(&self) -> &str {
        &self.guid
    }
}
