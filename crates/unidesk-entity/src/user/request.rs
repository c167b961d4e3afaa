//! User requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use unidesk_core::AppResult;
use unidesk_core::query::{GetRequest, ListParams};
use unidesk_core::traits::{UpdateRequest, WriteRequest};
use unidesk_core::types::{FilterExpr, Value, WriteValues};

use crate::validation::{check_email, check_email_opt, require_text, require_text_opt};

/// List users.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUsers {
    /// Paging, projection, sort and visibility.
    #[serde(flatten)]
    pub params: ListParams,
    /// Substring of the name.
    pub name: Option<String>,
    /// Substring of the email.
    pub email: Option<String>,
    /// Exact email.
    pub email_equal: Option<String>,
    /// Substring of the phone number.
    pub phone: Option<String>,
    /// Assigned role.
    pub role_id: Option<i64>,
    /// Joined on or after.
    pub joined_on_more: Option<NaiveDate>,
    /// Joined on or before.
    pub joined_on_less: Option<NaiveDate>,
}

impl GetRequest for GetUsers {
    fn params(&self) -> &ListParams {
        &self.params
    }

    fn filters(&self) -> Vec<FilterExpr> {
        [
            FilterExpr::contains_opt("name", self.name.as_deref()),
            FilterExpr::contains_opt("email", self.email.as_deref()),
            FilterExpr::equals_opt("email", self.email_equal.clone()),
            FilterExpr::contains_opt("phone", self.phone.as_deref()),
            FilterExpr::equals_opt("roleId", self.role_id),
            FilterExpr::range_opt("joinedOn", self.joined_on_more, self.joined_on_less),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Create a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Assigned role.
    pub role_id: i64,
    /// Date the account was opened.
    pub joined_on: Option<NaiveDate>,
}

impl WriteRequest for CreateUser {
    fn values(&self) -> Vec<(&'static str, Value)> {
        WriteValues::new()
            .set("name", self.name.as_str())
            .set("email", self.email.as_str())
            .set_opt("phone", self.phone.clone())
            .set("roleId", self.role_id)
            .set_opt("joinedOn", self.joined_on)
            .into_vec()
    }

    fn validate(&self) -> AppResult<()> {
        require_text("name", &self.name)?;
        check_email("email", &self.email)
    }
}

/// Update a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    /// User id.
    pub id: i64,
    /// Guid the caller last read.
    pub guid: String,
    /// New name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New role.
    pub role_id: Option<i64>,
    /// New join date.
    pub joined_on: Option<NaiveDate>,
}

impl WriteRequest for UpdateUser {
    fn values(&self) -> Vec<(&'static str, Value)> {
        WriteValues::new()
            .set_opt("name", self.name.clone())
            .set_opt("email", self.email.clone())
            .set_opt("phone", self.phone.clone())
            .set_opt("roleId", self.role_id)
            .set_opt("joinedOn", self.joined_on)
            .into_vec()
    }

    fn validate(&self) -> AppResult<()> {
        require_text_opt("name", self.name.as_deref())?;
        check_email_opt("email", self.email.as_deref())
    }
}

impl UpdateRequest for UpdateUser {
    fn id(&self) -> i64 {
        self.id
    }

    fn guid(&self) -> &str {
        &self.guid
    }
}

#[cfg(test)]
mod tests {
    use unidesk_core::types::Comparison;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_filters_skip_absent_and_empty() {
        let request = GetUsers {
            name: Some(String::new()),
            email_equal: Some("ann@uni.edu".into()),
            role_id: Some(3),
            joined_on_more: Some(date(2024, 1, 1)),
            ..GetUsers::default()
        };

        assert_eq!(
            request.filters(),
            vec![
                FilterExpr::new("email", Comparison::Equals(Value::from("ann@uni.edu"))),
                FilterExpr::new("roleId", Comparison::Equals(Value::Integer(3))),
                FilterExpr::new(
                    "joinedOn",
                    Comparison::Range {
                        min: Some(Value::Date(date(2024, 1, 1))),
                        max: None,
                    }
                ),
            ]
        );
    }

    #[test]
    fn test_date_range_from_json() {
        let request: GetUsers = serde_json::from_value(serde_json::json!({
            "joinedOnMore": "2024-01-01",
            "joinedOnLess": "2024-12-31",
            "orderField": "role.name",
            "isDesc": true,
        }))
        .expect("deserialize");

        assert_eq!(request.joined_on_less, Some(date(2024, 12, 31)));
        assert_eq!(request.params.order_field.as_deref(), Some("role.name"));
        assert_eq!(request.filters().len(), 1);
    }

    #[test]
    fn test_update_only_sends_changed_fields() {
        let update = UpdateUser {
            id: 5,
            guid: "g1".into(),
            name: None,
            email: Some("new@uni.edu".into()),
            phone: None,
            role_id: None,
            joined_on: None,
        };
        assert_eq!(update.values(), vec![("email", Value::from("new@uni.edu"))]);
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_create_rejects_bad_email() {
        let create = CreateUser {
            name: "Ann".into(),
            email: "ann".into(),
            phone: None,
            role_id: 1,
            joined_on: None,
        };
        assert!(create.validate().is_err());
    }
}
