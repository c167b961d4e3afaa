//! PostgreSQL store.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::{debug, instrument};

use unidesk_core::query::QueryPlan;
use unidesk_core::registry::{EntityDescriptor, FieldDef, FieldKind};
use unidesk_core::result::AppResult;
use unidesk_core::traits::{DeleteOutcome, EntityStore, RowState};
use unidesk_core::types::{Record, Value};

use crate::error::map_sqlx;
use crate::sql;

/// [`EntityStore`] backed by a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore for PgStore {
    #[instrument(skip(self, plan), fields(entity = plan.entity.name))]
    async fn fetch_page(&self, plan: &QueryPlan) -> AppResult<(Vec<Record>, u64)> {
        let rows = sql::select_page(plan)
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx(&format!("Failed to list {} rows", plan.entity.name), e))?;

        let total: i64 = match rows.first() {
            Some(row) => row
                .try_get(sql::TOTAL_ALIAS)
                .map_err(|e| map_sqlx("Failed to decode total", e))?,
            None => sql::count(plan)
                .build_query_scalar()
                .fetch_one(&self.pool)
                .await
                .map_err(|e| map_sqlx(&format!("Failed to count {} rows", plan.entity.name), e))?,
        };
        let total = u64::try_from(total).unwrap_or_default();

        let records = rows
            .iter()
            .map(|row| decode_row(row, &plan.projection.fields))
            .collect::<AppResult<Vec<_>>>()?;

        debug!(rows = records.len(), total, "Fetched page");
        Ok((records, total))
    }

    async fn fetch_state(
        &self,
        entity: &'static EntityDescriptor,
        id: i64,
    ) -> AppResult<Option<RowState>> {
        let row = sql::fetch_state(entity, id)
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx(&format!("Failed to read {} {id} state", entity.name), e))?;

        row.map(|row| {
            Ok(RowState {
                guid: row.try_get(0).map_err(|e| map_sqlx("Failed to decode guid", e))?,
                is_deleted: row
                    .try_get(1)
                    .map_err(|e| map_sqlx("Failed to decode is_deleted", e))?,
            })
        })
        .transpose()
    }

    #[instrument(skip(self, columns, guid), fields(entity = entity.name))]
    async fn insert(
        &self,
        entity: &'static EntityDescriptor,
        columns: &[(&'static str, Value)],
        guid: &str,
    ) -> AppResult<i64> {
        sql::insert(entity, columns, guid)
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx(&format!("Failed to create {}", entity.name), e))
    }

    #[instrument(skip(self, expected_guid, columns, new_guid), fields(entity = entity.name))]
    async fn update_if_current(
        &self,
        entity: &'static EntityDescriptor,
        id: i64,
        expected_guid: &str,
        columns: &[(&'static str, Value)],
        new_guid: &str,
    ) -> AppResult<bool> {
        let result = sql::update_if_current(entity, id, expected_guid, columns, new_guid)
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx(&format!("Failed to update {} {id}", entity.name), e))?;
        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self, expected_guid), fields(entity = entity.name))]
    async fn delete_if_current(
        &self,
        entity: &'static EntityDescriptor,
        id: i64,
        expected_guid: &str,
    ) -> AppResult<DeleteOutcome> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx("Failed to begin delete", e))?;

        let deleted = sql::delete_if_current(entity, id, expected_guid)
            .build()
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx(&format!("Failed to delete {} {id}", entity.name), e))?
            .rows_affected();
        if deleted == 0 {
            tx.rollback()
                .await
                .map_err(|e| map_sqlx("Failed to roll back delete", e))?;
            return Ok(DeleteOutcome::default());
        }

        let mut cascaded = 0;
        for rule in entity.cascades {
            cascaded += sql::cascade_delete(rule, id)
                .build()
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    map_sqlx(
                        &format!("Failed to cascade {} delete to {}", entity.name, rule.child.name),
                        e,
                    )
                })?
                .rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx("Failed to commit delete", e))?;

        Ok(DeleteOutcome {
            deleted: true,
            cascaded,
        })
    }
}

/// Decode a projected row positionally into a shaped record.
fn decode_row(row: &PgRow, fields: &[&'static FieldDef]) -> AppResult<Record> {
    let mut record = Record::new();
    for (i, field) in fields.iter().enumerate() {
        let value = match field.kind {
            FieldKind::Integer => row.try_get::<Option<i64>, _>(i).map(Value::from),
            FieldKind::Float => row.try_get::<Option<f64>, _>(i).map(Value::from),
            FieldKind::Text => row.try_get::<Option<String>, _>(i).map(Value::from),
            FieldKind::Bool => row.try_get::<Option<bool>, _>(i).map(Value::from),
            FieldKind::Date => row.try_get::<Option<NaiveDate>, _>(i).map(Value::from),
            FieldKind::Timestamp => row.try_get::<Option<DateTime<Utc>>, _>(i).map(Value::from),
        }
        .map_err(|e| map_sqlx(&format!("Failed to decode field '{}'", field.name), e))?;
        record.insert(field.name, value.to_json());
    }
    Ok(record)
}
