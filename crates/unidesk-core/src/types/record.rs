//! Projected rows.
//!
//! A [`Record`] holds exactly the fields a caller selected. Dotted field
//! names (`role.name`) are stored as nested objects, so a record selecting
//! `id`, `role.id` and `role.name` serializes as
//! `{"id": 1, "role": {"id": 2, "name": "admin"}}`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use crate::error::{AppError, ErrorKind};
use crate::result::AppResult;

/// A single projected row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Json>);

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, creating nested objects for dotted names.
    pub fn insert(&mut self, field: &str, value: Json) {
        let mut parts = field.split('.').peekable();
        let mut current = &mut self.0;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                current.insert(part.to_string(), value);
                return;
            }
            let slot = current
                .entry(part.to_string())
                .or_insert_with(|| Json::Object(Map::new()));
            if !slot.is_object() {
                *slot = Json::Object(Map::new());
            }
            let Json::Object(next) = slot else {
                return;
            };
            current = next;
        }
    }

    /// Look up a field by its (possibly dotted) name.
    pub fn get(&self, field: &str) -> Option<&Json> {
        let mut parts = field.split('.');
        let first = parts.next()?;
        parts.try_fold(self.0.get(first)?, |value, part| value.get(part))
    }

    /// Whether the record carries the given (possibly dotted) field.
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// The row's surrogate key, when projected.
    pub fn id(&self) -> Option<i64> {
        self.get("id").and_then(Json::as_i64)
    }

    /// Text value of a field.
    pub fn str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Json::as_str)
    }

    /// Top-level keys, in insertion order of the underlying map.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Every leaf field as a dotted name, depth first.
    pub fn leaf_fields(&self) -> Vec<String> {
        fn walk(prefix: &str, map: &Map<String, Json>, out: &mut Vec<String>) {
            for (key, value) in map {
                let name = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                match value {
                    Json::Object(inner) => walk(&name, inner, out),
                    _ => out.push(name),
                }
            }
        }
        let mut out = Vec::new();
        walk("", &self.0, &mut out);
        out
    }

    /// Deserialize into a typed model.
    ///
    /// Records are shaped by the store, so a mismatch is a model defect and
    /// reported as `GENERAL`.
    pub fn into_typed<T: DeserializeOwned>(self) -> AppResult<T> {
        serde_json::from_value(Json::Object(self.0)).map_err(|e| {
            AppError::with_source(
                ErrorKind::General,
                format!(
                    "Record does not fit {}: {e}",
                    std::any::type_name::<T>()
                ),
                e,
            )
        })
    }

    /// Borrow the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Json> {
        &self.0
    }
}

impl From<Map<String, Json>> for Record {
    fn from(map: Map<String, Json>) -> Self {
        Self(map)
    }
}

impl From<Record> for Json {
    fn from(record: Record) -> Self {
        Json::Object(record.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dotted_fields_nest() {
        let mut record = Record::new();
        record.insert("id", json!(1));
        record.insert("role.id", json!(2));
        record.insert("role.name", json!("admin"));

        assert_eq!(
            Json::from(record.clone()),
            json!({"id": 1, "role": {"id": 2, "name": "admin"}})
        );
        assert_eq!(record.str("role.name"), Some("admin"));
        assert_eq!(record.id(), Some(1));
        let mut leaves = record.leaf_fields();
        leaves.sort();
        assert_eq!(leaves, vec!["id", "role.id", "role.name"]);
    }

    #[test]
    fn test_into_typed() {
        #[derive(Deserialize)]
        struct Partial {
            id: i64,
            name: Option<String>,
        }

        let mut record = Record::new();
        record.insert("id", json!(7));
        let typed: Partial = record.into_typed().expect("deserialize");
        assert_eq!(typed.id, 7);
        assert!(typed.name.is_none());
    }

    #[test]
    fn test_into_typed_mismatch_is_general() {
        #[derive(Debug, Deserialize)]
        struct Partial {
            #[allow(dead_code)]
            id: i64,
        }

        let mut record = Record::new();
        record.insert("id", json!("seven"));
        let err = record.into_typed::<Partial>().unwrap_err();
        assert_eq!(err.kind, ErrorKind::General);
    }
}
