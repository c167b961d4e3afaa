//! SQL compiler for query plans and guarded writes.
//!
//! Every statement the Postgres store runs is built here with
//! [`QueryBuilder`], so values are always bound and identifiers always come
//! from static descriptors. The base table is aliased `"base"`; each joined
//! relation is aliased by its relation name.

use sqlx::{Postgres, QueryBuilder};

use unidesk_core::query::{Condition, QueryPlan};
use unidesk_core::registry::{
    CascadeRule, ColumnRef, DELETED_COLUMN, EntityDescriptor, GUID_COLUMN, ID_COLUMN,
};
use unidesk_core::types::{Comparison, Value, Visibility};

/// Alias of the queried table.
const BASE_ALIAS: &str = "base";

/// Column carrying the match count on every page row.
pub const TOTAL_ALIAS: &str = "__total";

/// A statement under construction.
pub type Sql = QueryBuilder<'static, Postgres>;

/// `SELECT` of one page of a plan's projection.
///
/// Each row also carries `COUNT(*) OVER ()` as its last column, so rows and
/// total come from the same snapshot.
pub fn select_page(plan: &QueryPlan) -> Sql {
    let mut qb = Sql::new("SELECT ");
    for field in &plan.projection.fields {
        push_column(&mut qb, &field.column_ref());
        qb.push(" AS ");
        push_ident(&mut qb, field.name);
        qb.push(", ");
    }
    qb.push("COUNT(*) OVER () AS ");
    push_ident(&mut qb, TOTAL_ALIAS);
    push_from(&mut qb, plan);
    push_where(&mut qb, plan);

    qb.push(" ORDER BY ");
    push_column(&mut qb, &plan.order.column);
    qb.push(" ").push(plan.order.direction.as_sql());
    if plan.order.column != ColumnRef::base(ID_COLUMN) {
        qb.push(", ");
        push_column(&mut qb, &ColumnRef::base(ID_COLUMN));
        qb.push(" ASC");
    }

    qb.push(" LIMIT ").push_bind(to_i64(plan.page.limit()));
    qb.push(" OFFSET ").push_bind(to_i64(plan.page.offset()));
    qb
}

/// `SELECT COUNT(*)` over the same rows as [`select_page`], ignoring paging.
/// Only needed when the page itself comes back empty.
pub fn count(plan: &QueryPlan) -> Sql {
    let mut qb = Sql::new("SELECT COUNT(*)");
    push_from(&mut qb, plan);
    push_where(&mut qb, plan);
    qb
}

/// Minimal state read used to classify a guarded write that hit no row.
pub fn fetch_state(entity: &EntityDescriptor, id: i64) -> Sql {
    let mut qb = Sql::new("SELECT ");
    push_ident(&mut qb, GUID_COLUMN);
    qb.push(", ");
    push_ident(&mut qb, DELETED_COLUMN);
    qb.push(" FROM ");
    push_ident(&mut qb, entity.table);
    qb.push(" WHERE ");
    push_ident(&mut qb, ID_COLUMN);
    qb.push(" = ").push_bind(id);
    qb
}

/// `INSERT` of a live row returning its id.
pub fn insert(entity: &EntityDescriptor, columns: &[(&'static str, Value)], guid: &str) -> Sql {
    let mut qb = Sql::new("INSERT INTO ");
    push_ident(&mut qb, entity.table);
    qb.push(" (");
    for (column, _) in columns {
        push_ident(&mut qb, column);
        qb.push(", ");
    }
    push_ident(&mut qb, GUID_COLUMN);
    qb.push(") VALUES (");
    for (_, value) in columns {
        push_value(&mut qb, value);
        qb.push(", ");
    }
    qb.push_bind(guid.to_string());
    qb.push(") RETURNING ");
    push_ident(&mut qb, ID_COLUMN);
    qb
}

/// Atomic compare-and-swap update: applies `columns` and the new guid only
/// while the row is live and still carries `expected_guid`.
pub fn update_if_current(
    entity: &EntityDescriptor,
    id: i64,
    expected_guid: &str,
    columns: &[(&'static str, Value)],
    new_guid: &str,
) -> Sql {
    let mut qb = Sql::new("UPDATE ");
    push_ident(&mut qb, entity.table);
    qb.push(" SET ");
    for (column, value) in columns {
        push_ident(&mut qb, column);
        qb.push(" = ");
        push_value(&mut qb, value);
        qb.push(", ");
    }
    push_ident(&mut qb, GUID_COLUMN);
    qb.push(" = ").push_bind(new_guid.to_string());
    push_guard(&mut qb, id, expected_guid);
    qb
}

/// Atomic guarded soft delete. The guid is left unchanged.
pub fn delete_if_current(entity: &EntityDescriptor, id: i64, expected_guid: &str) -> Sql {
    let mut qb = Sql::new("UPDATE ");
    push_ident(&mut qb, entity.table);
    qb.push(" SET ");
    push_ident(&mut qb, DELETED_COLUMN);
    qb.push(" = TRUE");
    push_guard(&mut qb, id, expected_guid);
    qb
}

/// Soft-delete the live dependents of a parent row, tagging the reason.
pub fn cascade_delete(rule: &CascadeRule, parent_id: i64) -> Sql {
    let child = rule.child;
    let mut qb = Sql::new("UPDATE ");
    push_ident(&mut qb, child.table);
    qb.push(" SET ");
    push_ident(&mut qb, DELETED_COLUMN);
    qb.push(" = TRUE");
    if let Some(column) = child.cascade_column {
        qb.push(", ");
        push_ident(&mut qb, column);
        qb.push(" = ").push_bind(rule.reason.to_string());
    }
    qb.push(" WHERE ");
    push_ident(&mut qb, rule.foreign_key);
    qb.push(" = ").push_bind(parent_id);
    qb.push(" AND ");
    push_ident(&mut qb, DELETED_COLUMN);
    qb.push(" = FALSE");
    qb
}

fn push_guard(qb: &mut Sql, id: i64, expected_guid: &str) {
    qb.push(" WHERE ");
    push_ident(qb, ID_COLUMN);
    qb.push(" = ").push_bind(id);
    qb.push(" AND ");
    push_ident(qb, GUID_COLUMN);
    qb.push(" = ").push_bind(expected_guid.to_string());
    qb.push(" AND ");
    push_ident(qb, DELETED_COLUMN);
    qb.push(" = FALSE");
}

fn push_from(qb: &mut Sql, plan: &QueryPlan) {
    qb.push(" FROM ");
    push_ident(qb, plan.entity.table);
    qb.push(" AS ");
    push_ident(qb, BASE_ALIAS);
    for join in &plan.projection.joins {
        let relation = join.relation;
        qb.push(" LEFT JOIN ");
        push_ident(qb, relation.table);
        qb.push(" AS ");
        push_ident(qb, relation.name);
        qb.push(" ON ");
        push_column(
            qb,
            &ColumnRef {
                relation: Some(relation),
                column: ID_COLUMN,
            },
        );
        qb.push(" = ");
        push_column(qb, &ColumnRef::base(relation.local_column));
    }
}

fn push_where(qb: &mut Sql, plan: &QueryPlan) {
    let visibility = visibility_conditions(plan);
    for (i, condition) in plan.conditions.iter().chain(&visibility).enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        push_condition(qb, condition);
    }
}

/// The base-table predicates selecting the plan's deletion states.
fn visibility_conditions(plan: &QueryPlan) -> Vec<Condition> {
    match &plan.visibility {
        Visibility::Live => vec![Condition::base_equals(DELETED_COLUMN, false)],
        Visibility::All => Vec::new(),
        Visibility::CascadeDeleted(reason) => match plan.entity.cascade_column {
            Some(column) => vec![
                Condition::base_equals(DELETED_COLUMN, true),
                Condition::base_equals(column, reason.clone()),
            ],
            None => vec![Condition {
                column: ColumnRef::base(ID_COLUMN),
                comparison: Comparison::OneOf(Vec::new()),
            }],
        },
    }
}

fn push_condition(qb: &mut Sql, condition: &Condition) {
    let column = &condition.column;
    match &condition.comparison {
        Comparison::Equals(Value::Null) => {
            push_column(qb, column);
            qb.push(" IS NULL");
        }
        Comparison::Equals(value) => {
            push_column(qb, column);
            qb.push(" = ");
            push_value(qb, value);
        }
        Comparison::Contains(text) => {
            push_column(qb, column);
            qb.push(" ILIKE ")
                .push_bind(format!("%{}%", escape_like(text)));
        }
        Comparison::Range { min, max } => {
            qb.push("(");
            let mut first = true;
            if let Some(min) = min {
                push_column(qb, column);
                qb.push(" >= ");
                push_value(qb, min);
                first = false;
            }
            if let Some(max) = max {
                if !first {
                    qb.push(" AND ");
                }
                push_column(qb, column);
                qb.push(" <= ");
                push_value(qb, max);
                first = false;
            }
            if first {
                qb.push("TRUE");
            }
            qb.push(")");
        }
        Comparison::OneOf(values) if values.is_empty() => {
            qb.push("FALSE");
        }
        Comparison::OneOf(values) => {
            push_column(qb, column);
            qb.push(" IN (");
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    qb.push(", ");
                }
                push_value(qb, value);
            }
            qb.push(")");
        }
    }
}

fn push_column(qb: &mut Sql, column: &ColumnRef) {
    push_ident(qb, column.relation.map_or(BASE_ALIAS, |r| r.name));
    qb.push(".");
    push_ident(qb, column.column);
}

fn push_ident(qb: &mut Sql, ident: &str) {
    qb.push("\"").push(ident.replace('"', "\"\"")).push("\"");
}

fn push_value(qb: &mut Sql, value: &Value) {
    match value {
        Value::Null => {
            qb.push("NULL");
        }
        Value::Bool(v) => {
            qb.push_bind(*v);
        }
        Value::Integer(v) => {
            qb.push_bind(*v);
        }
        Value::Float(v) => {
            qb.push_bind(*v);
        }
        Value::Text(v) => {
            qb.push_bind(v.clone());
        }
        Value::Date(v) => {
            qb.push_bind(*v);
        }
        Value::Timestamp(v) => {
            qb.push_bind(*v);
        }
    }
}

/// Escape `LIKE` metacharacters so user text matches literally.
fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn to_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use unidesk_core::config::QueryConfig;
    use unidesk_core::query::{ListParams, QueryCompiler};
    use unidesk_entity::user::{DESCRIPTOR as USERS, GetUsers};
    use unidesk_entity::{honor, teacher};

    use super::*;

    fn plan(request: &GetUsers) -> QueryPlan {
        QueryCompiler::new(QueryConfig::default())
            .compile(&USERS, request)
            .expect("plan")
    }

    #[test]
    fn test_default_select() {
        let plan = plan(&GetUsers::default());
        assert_eq!(
            select_page(&plan).sql(),
            "SELECT \"base\".\"id\" AS \"id\", \"base\".\"name\" AS \"name\", \
             COUNT(*) OVER () AS \"__total\" \
             FROM \"users\" AS \"base\" \
             WHERE \"base\".\"is_deleted\" = $1 \
             ORDER BY \"base\".\"id\" ASC LIMIT $2 OFFSET $3"
        );
        assert_eq!(
            count(&plan).sql(),
            "SELECT COUNT(*) FROM \"users\" AS \"base\" WHERE \"base\".\"is_deleted\" = $1"
        );
    }

    #[test]
    fn test_join_only_when_selected() {
        let request = GetUsers {
            params: ListParams {
                select: vec!["role.name".into(), "role.id".into()],
                ..ListParams::default()
            },
            ..GetUsers::default()
        };
        let sql = select_page(&plan(&request)).sql().to_string();
        assert!(sql.starts_with(
            "SELECT \"base\".\"id\" AS \"id\", \"role\".\"name\" AS \"role.name\", \
             \"role\".\"id\" AS \"role.id\", COUNT(*) OVER () AS \"__total\" \
             FROM \"users\" AS \"base\" \
             LEFT JOIN \"roles\" AS \"role\" ON \"role\".\"id\" = \"base\".\"role_id\""
        ));
        assert_eq!(sql.matches("LEFT JOIN").count(), 1);

        let sql = select_page(&plan(&GetUsers::default())).sql().to_string();
        assert!(!sql.contains("JOIN"));
    }

    #[test]
    fn test_filters_and_sort() {
        let request = GetUsers {
            params: ListParams {
                ids: Some(vec![1, 2, 3]),
                order_field: Some("name".into()),
                is_desc: Some(true),
                show_deleted: Some(true),
                ..ListParams::default()
            },
            name: Some("ann".into()),
            joined_on_more: chrono::NaiveDate::from_ymd_opt(2024, 1, 1),
            ..GetUsers::default()
        };
        let sql = select_page(&plan(&request)).sql().to_string();
        assert!(sql.contains(
            "WHERE \"base\".\"id\" IN ($1, $2, $3) \
             AND \"base\".\"name\" ILIKE $4 \
             AND (\"base\".\"joined_on\" >= $5) \
             ORDER BY \"base\".\"name\" DESC, \"base\".\"id\" ASC"
        ));
        assert!(!sql.contains("is_deleted"));
    }

    #[test]
    fn test_empty_id_set_matches_nothing() {
        let request = GetUsers {
            params: ListParams {
                ids: Some(vec![]),
                ..ListParams::default()
            },
            ..GetUsers::default()
        };
        let sql = count(&plan(&request)).sql().to_string();
        assert!(sql.contains("WHERE FALSE AND"));
    }

    #[test]
    fn test_guarded_update() {
        let columns = vec![("email", Value::from("a@b.io")), ("role_id", Value::Integer(2))];
        assert_eq!(
            update_if_current(&USERS, 5, "g1", &columns, "g2").sql(),
            "UPDATE \"users\" SET \"email\" = $1, \"role_id\" = $2, \"guid\" = $3 \
             WHERE \"id\" = $4 AND \"guid\" = $5 AND \"is_deleted\" = FALSE"
        );
    }

    #[test]
    fn test_guarded_delete_keeps_guid() {
        assert_eq!(
            delete_if_current(&USERS, 5, "g2").sql(),
            "UPDATE \"users\" SET \"is_deleted\" = TRUE \
             WHERE \"id\" = $1 AND \"guid\" = $2 AND \"is_deleted\" = FALSE"
        );
    }

    #[test]
    fn test_cascade_tags_reason() {
        let rule = &teacher::DESCRIPTOR.cascades[0];
        assert_eq!(rule.child.table, honor::DESCRIPTOR.table);
        assert_eq!(
            cascade_delete(rule, 9).sql(),
            "UPDATE \"honors\" SET \"is_deleted\" = TRUE, \"cascade_deleted_by\" = $1 \
             WHERE \"teacher_id\" = $2 AND \"is_deleted\" = FALSE"
        );
    }

    #[test]
    fn test_cascade_selector_filters_reason() {
        let request = honor::GetHonors {
            params: ListParams {
                cascade_deleted_by: Some("teacher".into()),
                show_deleted: Some(true),
                ..ListParams::default()
            },
            ..honor::GetHonors::default()
        };
        let plan = QueryCompiler::new(QueryConfig::default())
            .compile(&honor::DESCRIPTOR, &request)
            .expect("plan");
        assert_eq!(
            count(&plan).sql(),
            "SELECT COUNT(*) FROM \"honors\" AS \"base\" \
             WHERE \"base\".\"is_deleted\" = $1 AND \"base\".\"cascade_deleted_by\" = $2"
        );
    }

    #[test]
    fn test_insert() {
        let columns = vec![("name", Value::from("Ann")), ("phone", Value::Null)];
        assert_eq!(
            insert(&USERS, &columns, "g0").sql(),
            "INSERT INTO \"users\" (\"name\", \"phone\", \"guid\") VALUES ($1, NULL, $2) \
             RETURNING \"id\""
        );
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_a\\b"), "50\\%\\_a\\\\b");
    }
}
