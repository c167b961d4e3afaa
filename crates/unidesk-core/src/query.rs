//! Filter/sort compiler.
//!
//! Turns a typed get request into a store-agnostic [`QueryPlan`]: the
//! projection, a conjunction of resolved [`Condition`]s, one ordering and
//! the paging window. Stores translate the plan into their own query form.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{QueryConfig, UnknownFieldPolicy};
use crate::error::AppError;
use crate::registry::{ColumnRef, EntityDescriptor, ID_COLUMN, Projection};
use crate::result::AppResult;
use crate::types::filter::{Comparison, FilterExpr};
use crate::types::pagination::PageRequest;
use crate::types::sorting::{SortDirection, SortField};
use crate::types::value::Value;
use crate::types::visibility::Visibility;

/// Parameters shared by every entity's get request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Page number (1-based).
    pub page: Option<i64>,
    /// Page size.
    pub size: Option<i64>,
    /// Exact id match; overrides `ids`.
    pub id: Option<i64>,
    /// Id membership.
    pub ids: Option<Vec<i64>>,
    /// Requested output fields.
    #[serde(default)]
    pub select: Vec<String>,
    /// Field to sort by; defaults to `id`.
    pub order_field: Option<String>,
    /// Sort descending.
    pub is_desc: Option<bool>,
    /// Include soft-deleted rows.
    pub show_deleted: Option<bool>,
    /// Only rows cascade-deleted for this reason.
    pub cascade_deleted_by: Option<String>,
}

impl ListParams {
    /// Parameters for a single-row lookup by id.
    pub fn by_id(id: i64, select: &[String]) -> Self {
        Self {
            id: Some(id),
            size: Some(1),
            select: select.to_vec(),
            ..Self::default()
        }
    }

    /// The id filter: `id` when set, otherwise `ids`.
    pub fn id_filter(&self) -> Option<FilterExpr> {
        match (self.id, &self.ids) {
            (Some(id), _) => Some(FilterExpr::equals("id", id)),
            (None, Some(ids)) => Some(FilterExpr::one_of("id", ids.iter().copied())),
            (None, None) => None,
        }
    }
}

/// A typed, per-entity get request.
pub trait GetRequest: Send + Sync {
    /// The shared paging/select/sort/visibility parameters.
    fn params(&self) -> &ListParams;

    /// Entity-specific filters (substring, equality, date ranges).
    fn filters(&self) -> Vec<FilterExpr> {
        Vec::new()
    }
}

impl GetRequest for ListParams {
    fn params(&self) -> &ListParams {
        self
    }
}

/// A resolved filter condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// The column tested.
    pub column: ColumnRef,
    /// The comparison applied.
    pub comparison: Comparison,
}

impl Condition {
    /// Equality on a base-table column.
    pub fn base_equals(column: &'static str, value: impl Into<Value>) -> Self {
        Self {
            column: ColumnRef::base(column),
            comparison: Comparison::Equals(value.into()),
        }
    }
}

/// A resolved ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderBy {
    /// Column to sort on.
    pub column: ColumnRef,
    /// Direction.
    pub direction: SortDirection,
}

/// Everything a store needs to run one list query.
#[derive(Debug, Clone)]
pub struct QueryPlan {
    /// The queried entity.
    pub entity: &'static EntityDescriptor,
    /// Projected fields and required joins.
    pub projection: Projection,
    /// Conjunction of request filters; empty means no filter. Visibility
    /// is not folded in.
    pub conditions: Vec<Condition>,
    /// Resolved ordering.
    pub order: OrderBy,
    /// Paging window.
    pub page: PageRequest,
    /// Deletion states admitted. Stores apply it on top of `conditions`.
    pub visibility: Visibility,
}

/// Compiles get requests into query plans.
#[derive(Debug, Clone, Default)]
pub struct QueryCompiler {
    config: QueryConfig,
}

impl QueryCompiler {
    /// Create a compiler with the given query settings.
    pub fn new(config: QueryConfig) -> Self {
        Self { config }
    }

    /// The settings this compiler applies.
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Compile a request against an entity descriptor.
    pub fn compile<R: GetRequest + ?Sized>(
        &self,
        entity: &'static EntityDescriptor,
        request: &R,
    ) -> AppResult<QueryPlan> {
        let params = request.params();
        let mut projection = entity.project(&params.select, self.config.unknown_fields)?;

        let mut conditions = Vec::new();
        for expr in params.id_filter().into_iter().chain(request.filters()) {
            let field = entity.require_field(&expr.field)?;
            if let Some(relation) = field.relation() {
                projection.require_join(relation);
            }
            conditions.push(Condition {
                column: field.column_ref(),
                comparison: expr.comparison,
            });
        }

        let visibility =
            Visibility::from_request(params.show_deleted, params.cascade_deleted_by.as_deref());
        if matches!(visibility, Visibility::CascadeDeleted(_)) && entity.cascade_column.is_none() {
            return Err(AppError::validation(format!(
                "Entity '{}' has no cascade deletions to select",
                entity.name
            )));
        }

        let order = self.resolve_order(entity, params, &mut projection)?;
        let page =
            PageRequest::from_request(params.page, params.size, self.config.default_page_size);

        debug!(
            entity = entity.name,
            fields = ?projection.field_names(),
            joins = projection.joins.len(),
            conditions = conditions.len(),
            page = page.page,
            size = page.size,
            "Compiled query plan"
        );

        Ok(QueryPlan {
            entity,
            projection,
            conditions,
            order,
            page,
            visibility,
        })
    }

    fn resolve_order(
        &self,
        entity: &'static EntityDescriptor,
        params: &ListParams,
        projection: &mut Projection,
    ) -> AppResult<OrderBy> {
        let sort = SortField::from_request(params.order_field.as_deref(), params.is_desc);
        let field = match entity.field(&sort.field) {
            Some(field) => field,
            None => match self.config.unknown_fields {
                UnknownFieldPolicy::Reject => {
                    return Err(AppError::validation(format!(
                        "Unknown order field '{}' for entity '{}'",
                        sort.field, entity.name
                    )));
                }
                UnknownFieldPolicy::Ignore => {
                    debug!(entity = entity.name, field = %sort.field, "Ignoring unknown order field");
                    return Ok(OrderBy {
                        column: ColumnRef::base(ID_COLUMN),
                        direction: SortDirection::Asc,
                    });
                }
            },
        };

        if let Some(relation) = field.relation() {
            projection.require_join(relation);
        }

        Ok(OrderBy {
            column: field.column_ref(),
            direction: sort.direction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::registry::fixtures::{PLAYER, TEAM, TEAMS};
    use crate::registry::Join;

    struct GetPlayers {
        params: ListParams,
        name: Option<String>,
        email_equal: Option<String>,
        team_name: Option<String>,
    }

    impl GetRequest for GetPlayers {
        fn params(&self) -> &ListParams {
            &self.params
        }

        fn filters(&self) -> Vec<FilterExpr> {
            [
                FilterExpr::contains_opt("name", self.name.as_deref()),
                FilterExpr::equals_opt("email", self.email_equal.clone()),
                FilterExpr::contains_opt("team.name", self.team_name.as_deref()),
            ]
            .into_iter()
            .flatten()
            .collect()
        }
    }

    fn request(params: ListParams) -> GetPlayers {
        GetPlayers {
            params,
            name: None,
            email_equal: None,
            team_name: None,
        }
    }

    #[test]
    fn test_defaults() {
        let plan = QueryCompiler::default()
            .compile(&PLAYER, &request(ListParams::default()))
            .expect("plan");

        assert_eq!(plan.projection.field_names(), vec!["id", "name"]);
        assert!(plan.conditions.is_empty());
        assert_eq!(plan.visibility, Visibility::Live);
        assert_eq!(plan.order.column, ColumnRef::base("id"));
        assert_eq!(plan.order.direction, SortDirection::Asc);
        assert_eq!(plan.page, PageRequest { page: 1, size: 5 });
    }

    #[test]
    fn test_id_overrides_ids() {
        let params = ListParams {
            id: Some(3),
            ids: Some(vec![1, 2]),
            ..ListParams::default()
        };
        let plan = QueryCompiler::default()
            .compile(&PLAYER, &request(params))
            .expect("plan");
        assert_eq!(
            plan.conditions[0],
            Condition::base_equals("id", 3_i64)
        );
    }

    #[test]
    fn test_ids_membership() {
        let params = ListParams {
            ids: Some(vec![1, 2]),
            ..ListParams::default()
        };
        let plan = QueryCompiler::default()
            .compile(&PLAYER, &request(params))
            .expect("plan");
        assert_eq!(
            plan.conditions[0].comparison,
            Comparison::OneOf(vec![Value::Integer(1), Value::Integer(2)])
        );
    }

    #[test]
    fn test_text_and_equality_filters() {
        let mut req = request(ListParams::default());
        req.name = Some("ann".into());
        req.email_equal = Some("ann@example.com".into());
        let plan = QueryCompiler::default().compile(&PLAYER, &req).expect("plan");

        assert_eq!(
            plan.conditions,
            vec![
                Condition {
                    column: ColumnRef::base("name"),
                    comparison: Comparison::Contains("ann".into()),
                },
                Condition::base_equals("email", "ann@example.com"),
            ]
        );
    }

    #[test]
    fn test_show_deleted_drops_soft_delete_filter() {
        let params = ListParams {
            show_deleted: Some(true),
            ..ListParams::default()
        };
        let plan = QueryCompiler::default()
            .compile(&PLAYER, &request(params))
            .expect("plan");
        assert!(plan.conditions.is_empty());
        assert_eq!(plan.visibility, Visibility::All);
    }

    #[test]
    fn test_cascade_selector() {
        let params = ListParams {
            cascade_deleted_by: Some("team".into()),
            ..ListParams::default()
        };
        let plan = QueryCompiler::default()
            .compile(&PLAYER, &request(params))
            .expect("plan");
        assert!(plan.conditions.is_empty());
        assert_eq!(plan.visibility, Visibility::CascadeDeleted("team".into()));
    }

    #[test]
    fn test_cascade_selector_needs_cascade_column() {
        let params = ListParams {
            cascade_deleted_by: Some("league".into()),
            ..ListParams::default()
        };
        let err = QueryCompiler::default()
            .compile(&TEAMS, &params)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_sort_on_relation_adds_join() {
        let params = ListParams {
            order_field: Some("team.name".into()),
            is_desc: Some(true),
            ..ListParams::default()
        };
        let plan = QueryCompiler::default()
            .compile(&PLAYER, &request(params))
            .expect("plan");

        assert_eq!(
            plan.projection.joins,
            vec![Join {
                relation: &TEAM,
                columns: vec![],
            }]
        );
        assert_eq!(plan.projection.field_names(), vec!["id", "name"]);
        assert_eq!(plan.order.direction, SortDirection::Desc);
    }

    #[test]
    fn test_filter_on_relation_adds_join() {
        let mut req = request(ListParams::default());
        req.team_name = Some("red".into());
        let plan = QueryCompiler::default().compile(&PLAYER, &req).expect("plan");
        assert_eq!(plan.projection.joins.len(), 1);
    }

    #[test]
    fn test_unknown_order_field() {
        let params = ListParams {
            order_field: Some("rank".into()),
            ..ListParams::default()
        };
        let err = QueryCompiler::default()
            .compile(&PLAYER, &request(params.clone()))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let lenient = QueryCompiler::new(QueryConfig {
            unknown_fields: UnknownFieldPolicy::Ignore,
            ..QueryConfig::default()
        });
        let plan = lenient.compile(&PLAYER, &request(params)).expect("plan");
        assert_eq!(plan.order.column, ColumnRef::base("id"));
    }

    #[test]
    fn test_configured_page_size() {
        let compiler = QueryCompiler::new(QueryConfig {
            default_page_size: 20,
            ..QueryConfig::default()
        });
        let plan = compiler
            .compile(&PLAYER, &request(ListParams::default()))
            .expect("plan");
        assert_eq!(plan.page.size, 20);
    }
}
