//! Teacher requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use unidesk_core::AppResult;
use unidesk_core::query::{GetRequest, ListParams};
use unidesk_core::traits::{UpdateRequest, WriteRequest};
use unidesk_core::types::{FilterExpr, Value, WriteValues};

use crate::validation::{check_email_opt, require_text, require_text_opt};

/// List teachers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTeachers {
    /// Paging, projection, sort and visibility.
    #[serde(flatten)]
    pub params: ListParams,
    /// Substring of the name.
    pub name: Option<String>,
    /// Substring of the academic title.
    pub title: Option<String>,
    /// Exact email.
    pub email_equal: Option<String>,
    /// Owning department.
    pub department_id: Option<i64>,
    /// Substring of the department name.
    pub department_name: Option<String>,
    /// Linked user account.
    pub user_id: Option<i64>,
    /// Hired on or after.
    pub hired_on_more: Option<NaiveDate>,
    /// Hired on or before.
    pub hired_on_less: Option<NaiveDate>,
}

impl GetRequest for GetTeachers {
    fn params(&self) -> &ListParams {
        &self.params
    }

    fn filters(&self) -> Vec<FilterExpr> {
        [
            FilterExpr::contains_opt("name", self.name.as_deref()),
            FilterExpr::contains_opt("title", self.title.as_deref()),
            FilterExpr::equals_opt("email", self.email_equal.clone()),
            FilterExpr::equals_opt("departmentId", self.department_id),
            FilterExpr::contains_opt("department.name", self.department_name.as_deref()),
            FilterExpr::equals_opt("userId", self.user_id),
            FilterExpr::range_opt("hiredOn", self.hired_on_more, self.hired_on_less),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Create a teacher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeacher {
    /// Full name.
    pub name: String,
    /// Academic title.
    pub title: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Owning department.
    pub department_id: i64,
    /// Linked user account.
    pub user_id: Option<i64>,
    /// Hiring date.
    pub hired_on: Option<NaiveDate>,
}

impl WriteRequest for CreateTeacher {
    fn values(&self) -> Vec<(&'static str, Value)> {
        WriteValues::new()
            .set("name", self.name.as_str())
            .set_opt("title", self.title.clone())
            .set_opt("email", self.email.clone())
            .set("departmentId", self.department_id)
            .set_opt("userId", self.user_id)
            .set_opt("hiredOn", self.hired_on)
            .into_vec()
    }

    fn validate(&self) -> AppResult<()> {
        require_text("name", &self.name)?;
        check_email_opt("email", self.email.as_deref())
    }
}

/// Update a teacher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeacher {
    /// Teacher id.
    pub id: i64,
    /// Guid the caller last read.
    pub guid: String,
    /// New name.
    pub name: Option<String>,
    /// New title.
    pub title: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New department.
    pub department_id: Option<i64>,
    /// New linked user account.
    pub user_id: Option<i64>,
    /// New hiring date.
    pub hired_on: Option<NaiveDate>,
}

impl WriteRequest for UpdateTeacher {
    fn values(&self) -> Vec<(&'static str, Value)> {
        WriteValues::new()
            .set_opt("name", self.name.clone())
            .set_opt("title", self.title.clone())
            .set_opt("email", self.email.clone())
            .set_opt("departmentId", self.department_id)
            .set_opt("userId", self.user_id)
            .set_opt("hiredOn", self.hired_on)
            .into_vec()
    }

    fn validate(&self) -> AppResult<()> {
        require_text_opt("name", self.name.as_deref())?;
        check_email_opt("email", self.email.as_deref())
    }
}

impl UpdateRequest for UpdateTeacher {
    fn id(&self) -> i64 {
        self.id
    }

    fn guid(&self) -> &str {
        &self.guid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_filter_uses_dotted_field() {
        let request = GetTeachers {
            department_name: Some("physics".into()),
            ..GetTeachers::default()
        };
        let filters = request.filters();
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].field, "department.name");
    }
}
