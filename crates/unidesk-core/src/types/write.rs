//! Mutation request and result envelopes.

use serde::{Deserialize, Serialize};

use super::value::Value;

/// Identity and concurrency token of a row after a successful write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteResult {
    /// Row id.
    pub id: i64,
    /// The row's current guid.
    pub guid: String,
}

/// A guarded delete: the row id plus the guid the caller last read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest {
    /// Row id.
    pub id: i64,
    /// Expected guid.
    pub guid: String,
}

impl DeleteRequest {
    /// Create a delete request.
    pub fn new(id: i64, guid: impl Into<String>) -> Self {
        Self {
            id,
            guid: guid.into(),
        }
    }
}

/// Field values collected by a create or update payload.
///
/// Absent optional fields are skipped so an update only touches what the
/// caller sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteValues(Vec<(&'static str, Value)>);

impl WriteValues {
    /// Start an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field.
    pub fn set(mut self, field: &'static str, value: impl Into<Value>) -> Self {
        self.0.push((field, value.into()));
        self
    }

    /// Set a field when a value is present.
    pub fn set_opt<V: Into<Value>>(self, field: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(field, value),
            None => self,
        }
    }

    /// The collected `(field, value)` pairs in insertion order.
    pub fn into_vec(self) -> Vec<(&'static str, Value)> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_result_shape() {
        let result = WriteResult {
            id: 5,
            guid: "abc".into(),
        };
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json, serde_json::json!({ "id": 5, "guid": "abc" }));
    }

    #[test]
    fn test_write_values_skip_absent() {
        let values = WriteValues::new()
            .set("name", "Ann")
            .set_opt("phone", None::<String>)
            .set_opt("roleId", Some(2_i64))
            .into_vec();
        assert_eq!(
            values,
            vec![("name", Value::from("Ann")), ("roleId", Value::Integer(2))]
        );
    }
}
