//! Role requests.

use serde::{Deserialize, Serialize};
use unidesk_core::AppResult;
use unidesk_core::query::{GetRequest, ListParams};
use unidesk_core::traits::{UpdateRequest, WriteRequest};
use unidesk_core::types::{FilterExpr, Value, WriteValues};

use crate::validation::{require_text, require_text_opt};

/// List roles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetRoles {
    /// Paging, projection, sort and visibility.
    #[serde(flatten)]
    pub params: ListParams,
    /// Substring of the name.
    pub name: Option<String>,
    /// Exact name.
    pub name_equal: Option<String>,
}

impl GetRequest for GetRoles {
    fn params(&self) -> &ListParams {
        &self.params
    }

    fn filters(&self) -> Vec<FilterExpr> {
        [
            FilterExpr::contains_opt("name", self.name.as_deref()),
            FilterExpr::equals_opt("name", self.name_equal.clone()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Create a role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRole {
    /// Role name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
}

impl WriteRequest for CreateRole {
    fn values(&self) -> Vec<(&'static str, Value)> {
        WriteValues::new()
            .set("name", self.name.as_str())
            .set_opt("description", self.description.clone())
            .into_vec()
    }

    fn validate(&self) -> AppResult<()> {
        require_text("name", &self.name)
    }
}

/// Update a role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRole {
    /// Role id.
    pub id: i64,
    /// Guid the caller last read.
    pub guid: String,
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

impl WriteRequest for UpdateRole {
    fn values(&self) -> Vec<(&'static str, Value)> {
        WriteValues::new()
            .set_opt("name", self.name.clone())
            .set_opt("description", self.description.clone())
            .into_vec()
    }

    fn validate(&self) -> AppResult<()> {
        require_text_opt("name", self.name.as_deref())
    }
}

impl UpdateRequest for UpdateRole {
    fn id(&self) -> i64 {
        self.id
    }

    fn guid(&self) -> &str {
        &self.guid
    }
}
