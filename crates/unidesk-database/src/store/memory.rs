//! In-process store.
//!
//! Evaluates query plans over rows held in memory, with the same visibility,
//! join, ordering and guard semantics as the SQL the Postgres store runs.
//! Every write takes the table lock, so guarded writes are atomic. Foreign
//! keys and unique constraints are not enforced.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use unidesk_core::query::{Condition, QueryPlan};
use unidesk_core::registry::{ColumnRef, DELETED_COLUMN, EntityDescriptor, GUID_COLUMN, ID_COLUMN};
use unidesk_core::result::AppResult;
use unidesk_core::traits::{DeleteOutcome, EntityStore, RowState};
use unidesk_core::types::{Comparison, DeletionState, Record, SortDirection, Value};

type Row = HashMap<&'static str, Value>;

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Row>,
}

type Tables = HashMap<&'static str, Table>;

/// [`EntityStore`] holding every table in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn fetch_page(&self, plan: &QueryPlan) -> AppResult<(Vec<Record>, u64)> {
        let tables = self.tables.read().await;
        let Some(table) = tables.get(plan.entity.table) else {
            return Ok((Vec::new(), 0));
        };

        let mut matches: Vec<&Row> = table
            .rows
            .values()
            .filter(|row| {
                plan.visibility.admits(&deletion_state(plan.entity, row))
                    && plan
                        .conditions
                        .iter()
                        .all(|c| satisfies(&resolve(&tables, row, &c.column), c))
            })
            .collect();

        matches.sort_by(|a, b| {
            let ordering = compare_for_sort(
                &resolve(&tables, a, &plan.order.column),
                &resolve(&tables, b, &plan.order.column),
            );
            let ordering = match plan.order.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            ordering.then_with(|| id_of(a).cmp(&id_of(b)))
        });

        let total = matches.len() as u64;
        let offset = usize::try_from(plan.page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(plan.page.limit()).unwrap_or(usize::MAX);

        let records: Vec<Record> = matches
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|row| {
                let mut record = Record::new();
                for field in &plan.projection.fields {
                    let value = resolve(&tables, row, &field.column_ref());
                    record.insert(field.name, value.to_json());
                }
                record
            })
            .collect();

        debug!(entity = plan.entity.name, rows = records.len(), total, "Fetched page");
        Ok((records, total))
    }

    async fn fetch_state(
        &self,
        entity: &'static EntityDescriptor,
        id: i64,
    ) -> AppResult<Option<RowState>> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(entity.table)
            .and_then(|t| t.rows.get(&id))
            .map(|row| RowState {
                guid: match row.get(GUID_COLUMN) {
                    Some(Value::Text(guid)) => guid.clone(),
                    _ => String::new(),
                },
                is_deleted: is_deleted(row),
            }))
    }

    async fn insert(
        &self,
        entity: &'static EntityDescriptor,
        columns: &[(&'static str, Value)],
        guid: &str,
    ) -> AppResult<i64> {
        let mut tables = self.tables.write().await;
        let table = tables.entry(entity.table).or_default();
        table.last_id += 1;
        let id = table.last_id;

        let mut row: Row = columns.iter().cloned().collect();
        row.insert(ID_COLUMN, Value::Integer(id));
        row.insert(GUID_COLUMN, Value::Text(guid.to_string()));
        row.insert(DELETED_COLUMN, Value::Bool(false));
        table.rows.insert(id, row);
        Ok(id)
    }

    async fn update_if_current(
        &self,
        entity: &'static EntityDescriptor,
        id: i64,
        expected_guid: &str,
        columns: &[(&'static str, Value)],
        new_guid: &str,
    ) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let Some(row) = live_row_with_guid(&mut tables, entity, id, expected_guid) else {
            return Ok(false);
        };
        for (column, value) in columns {
            row.insert(*column, value.clone());
        }
        row.insert(GUID_COLUMN, Value::Text(new_guid.to_string()));
        Ok(true)
    }

    async fn delete_if_current(
        &self,
        entity: &'static EntityDescriptor,
        id: i64,
        expected_guid: &str,
    ) -> AppResult<DeleteOutcome> {
        let mut tables = self.tables.write().await;
        let Some(row) = live_row_with_guid(&mut tables, entity, id, expected_guid) else {
            return Ok(DeleteOutcome::default());
        };
        row.insert(DELETED_COLUMN, Value::Bool(true));

        let mut cascaded = 0;
        for rule in entity.cascades {
            let Some(children) = tables.get_mut(rule.child.table) else {
                continue;
            };
            let next = DeletionState::DeletedCascade(rule.reason.to_string());
            for child in children.rows.values_mut() {
                if child.get(rule.foreign_key) != Some(&Value::Integer(id))
                    || !deletion_state(rule.child, child).can_transition_to(&next)
                {
                    continue;
                }
                child.insert(DELETED_COLUMN, Value::Bool(true));
                if let Some(column) = rule.child.cascade_column {
                    child.insert(column, Value::Text(rule.reason.to_string()));
                }
                cascaded += 1;
            }
        }

        Ok(DeleteOutcome {
            deleted: true,
            cascaded,
        })
    }
}

fn live_row_with_guid<'a>(
    tables: &'a mut Tables,
    entity: &EntityDescriptor,
    id: i64,
    expected_guid: &str,
) -> Option<&'a mut Row> {
    tables
        .get_mut(entity.table)
        .and_then(|t| t.rows.get_mut(&id))
        .filter(|row| {
            !is_deleted(row)
                && matches!(row.get(GUID_COLUMN), Some(Value::Text(guid)) if guid == expected_guid)
        })
}

fn is_deleted(row: &Row) -> bool {
    matches!(row.get(DELETED_COLUMN), Some(Value::Bool(true)))
}

fn deletion_state(entity: &EntityDescriptor, row: &Row) -> DeletionState {
    let reason = entity
        .cascade_column
        .and_then(|column| match row.get(column) {
            Some(Value::Text(reason)) => Some(reason.as_str()),
            _ => None,
        });
    DeletionState::from_flags(is_deleted(row), reason)
}

fn id_of(row: &Row) -> i64 {
    match row.get(ID_COLUMN) {
        Some(Value::Integer(id)) => *id,
        _ => 0,
    }
}

/// Read a column, following a relation the way a `LEFT JOIN` would.
fn resolve(tables: &Tables, row: &Row, column: &ColumnRef) -> Value {
    let source = match column.relation {
        None => Some(row),
        Some(relation) => match row.get(relation.local_column) {
            Some(Value::Integer(fk)) => tables.get(relation.table).and_then(|t| t.rows.get(fk)),
            _ => None,
        },
    };
    source
        .and_then(|r| r.get(column.column))
        .cloned()
        .unwrap_or(Value::Null)
}

fn satisfies(value: &Value, condition: &Condition) -> bool {
    match &condition.comparison {
        Comparison::Equals(Value::Null) => value.is_null(),
        Comparison::Equals(expected) => compare(value, expected) == Some(Ordering::Equal),
        Comparison::Contains(text) => match value {
            Value::Text(s) => s.to_lowercase().contains(&text.to_lowercase()),
            _ => false,
        },
        Comparison::Range { min, max } => {
            let above = min
                .as_ref()
                .is_none_or(|min| matches!(compare(value, min), Some(Ordering::Greater | Ordering::Equal)));
            let below = max
                .as_ref()
                .is_none_or(|max| matches!(compare(value, max), Some(Ordering::Less | Ordering::Equal)));
            above && below
        }
        Comparison::OneOf(values) => values
            .iter()
            .any(|v| compare(value, v) == Some(Ordering::Equal)),
    }
}

/// SQL-style comparison: `None` when either side is `NULL` or the types differ.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::Integer(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
        (Value::Float(a), Value::Integer(b)) => a.partial_cmp(&(*b as f64)),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
        (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Ordering for sorts: `NULL` sorts after every value, as in PostgreSQL.
fn compare_for_sort(a: &Value, b: &Value) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => compare(a, b).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_is_sql_like() {
        assert_eq!(compare(&Value::Integer(1), &Value::Float(1.5)), Some(Ordering::Less));
        assert_eq!(compare(&Value::Null, &Value::Integer(1)), None);
        assert_eq!(compare(&Value::from("a"), &Value::Integer(1)), None);
    }

    #[test]
    fn test_nulls_sort_last() {
        assert_eq!(compare_for_sort(&Value::Null, &Value::Integer(1)), Ordering::Greater);
        assert_eq!(compare_for_sort(&Value::from("a"), &Value::from("b")), Ordering::Less);
    }

    #[test]
    fn test_deletion_state_reads_cascade_tag() {
        use unidesk_entity::{honor, role};

        let mut row: Row = HashMap::from([(DELETED_COLUMN, Value::Bool(false))]);
        assert_eq!(deletion_state(&honor::DESCRIPTOR, &row), DeletionState::Live);

        row.insert(DELETED_COLUMN, Value::Bool(true));
        assert_eq!(deletion_state(&honor::DESCRIPTOR, &row), DeletionState::DeletedDirect);

        row.insert("cascade_deleted_by", Value::from("teacher"));
        assert_eq!(
            deletion_state(&honor::DESCRIPTOR, &row),
            DeletionState::DeletedCascade("teacher".into())
        );
        assert_eq!(deletion_state(&role::DESCRIPTOR, &row), DeletionState::DeletedDirect);
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let condition = Condition {
            column: ColumnRef::base("name"),
            comparison: Comparison::Contains("ANN".into()),
        };
        assert!(satisfies(&Value::from("Joanne"), &condition));
        assert!(!satisfies(&Value::Null, &condition));
    }
}
