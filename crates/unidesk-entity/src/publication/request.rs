//! Publication requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use unidesk_core::query::{GetRequest, ListParams};
use unidesk_core::traits::{UpdateRequest, WriteRequest};
use unidesk_core::types::{FilterExpr, Value, WriteValues};
use unidesk_core::{AppError, AppResult};

use crate::validation::{require_text, require_text_opt};

/// List publications.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPublications {
    /// Paging, projection, sort and visibility.
    #[serde(flatten)]
    pub params: ListParams,
    /// Substring of the title.
    pub title: Option<String>,
    /// Substring of the venue.
    pub venue: Option<String>,
    /// Authoring teacher.
    pub teacher_id: Option<i64>,
    /// Published on or after.
    pub published_on_more: Option<NaiveDate>,
    /// Published on or before.
    pub published_on_less: Option<NaiveDate>,
    /// At least this many citations.
    pub citations_more: Option<i64>,
    /// At most this many citations.
    pub citations_less: Option<i64>,
}

impl GetRequest for GetPublications {
    fn params(&self) -> &ListParams {
        &self.params
    }

    fn filters(&self) -> Vec<FilterExpr> {
        [
            FilterExpr::contains_opt("title", self.title.as_deref()),
            FilterExpr::contains_opt("venue", self.venue.as_deref()),
            FilterExpr::equals_opt("teacherId", self.teacher_id),
            FilterExpr::range_opt("publishedOn", self.published_on_more, self.published_on_less),
            FilterExpr::range_opt("citations", self.citations_more, self.citations_less),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

fn check_citations(citations: Option<i64>) -> AppResult<()> {
    match citations {
        Some(n) if n < 0 => Err(AppError::validation("'citations' must not be negative")),
        _ => Ok(()),
    }
}

/// Create a publication.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePublication {
    /// Title.
    pub title: String,
    /// Journal or conference.
    pub venue: Option<String>,
    /// Publication date.
    pub published_on: Option<NaiveDate>,
    /// Citation count.
    pub citations: Option<i64>,
    /// Authoring teacher.
    pub teacher_id: i64,
}

impl WriteRequest for CreatePublication {
    fn values(&self) -> Vec<(&'static str, Value)> {
        WriteValues::new()
            .set("title", self.title.as_str())
            .set_opt("venue", self.venue.clone())
            .set_opt("publishedOn", self.published_on)
            .set_opt("citations", self.citations)
            .set("teacherId", self.teacher_id)
            .into_vec()
    }

    fn validate(&self) -> AppResult<()> {
        require_text("title", &self.title)?;
        check_citations(self.citations)
    }
}

/// Update a publication.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePublication {
    /// Publication id.
    pub id: i64,
    /// Guid the caller last read.
    pub guid: String,
    /// New title.
    pub title: Option<String>,
    /// New venue.
    pub venue: Option<String>,
    /// New publication date.
    pub published_on: Option<NaiveDate>,
    /// New citation count.
    pub citations: Option<i64>,
    /// New authoring teacher.
    pub teacher_id: Option<i64>,
}

impl WriteRequest for UpdatePublication {
    fn values(&self) -> Vec<(&'static str, Value)> {
        WriteValues::new()
            .set_opt("title", self.title.clone())
            .set_opt("venue", self.venue.clone())
            .set_opt("publishedOn", self.published_on)
            .set_opt("citations", self.citations)
            .set_opt("teacherId", self.teacher_id)
            .into_vec()
    }

    fn validate(&self) -> AppResult<()> {
        require_text_opt("title", self.title.as_deref())?;
        check_citations(self.citations)
    }
}

impl UpdateRequest for UpdatePublication {
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

    #[test]
    fn test_numeric_range() {
        let request = GetPublications {
            citations_less: Some(10),
            ..GetPublications::default()
        };
        assert_eq!(
            request.filters(),
            vec![FilterExpr::new(
                "citations",
                Comparison::Range {
                    min: None,
                    max: Some(Value::Integer(10)),
                }
            )]
        );
    }

    #[test]
    fn test_negative_citations_rejected() {
        let update = UpdatePublication {
            id: 1,
            guid: "g".into(),
            title: None,
            venue: None,
            published_on: None,
            citations: Some(-1),
            teacher_id: None,
        };
        assert!(update.validate().is_err());
    }
}
