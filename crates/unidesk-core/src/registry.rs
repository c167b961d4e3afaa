//! Declarative field registry.
//!
//! Every entity is described once by a static [`EntityDescriptor`]: its
//! table, the fields a caller may request, which of them live on a joined
//! relation, and which parent deletions cascade into it. Projection, filter
//! resolution, sort resolution and write validation all go through this
//! table instead of per-entity conditional logic.

use tracing::debug;

use crate::config::UnknownFieldPolicy;
use crate::error::AppError;
use crate::result::AppResult;

/// Surrogate key column present on every table.
pub const ID_COLUMN: &str = "id";
/// Concurrency token column present on every mutable table.
pub const GUID_COLUMN: &str = "guid";
/// Soft-delete flag column present on every table.
pub const DELETED_COLUMN: &str = "is_deleted";

/// Storage type of a field, used when decoding rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 64-bit integer.
    Integer,
    /// Double precision float.
    Float,
    /// Text.
    Text,
    /// Boolean.
    Bool,
    /// Calendar date.
    Date,
    /// Timestamp with time zone.
    Timestamp,
}

/// A many-to-one relation reachable through a foreign key on the base table.
///
/// The join condition is always `{name}.id = base.{local_column}`.
#[derive(Debug, PartialEq, Eq)]
pub struct Relation {
    /// Alias and dotted prefix, e.g. `"role"` for `role.name`.
    pub name: &'static str,
    /// Target table.
    pub table: &'static str,
    /// Foreign key column on the base table.
    pub local_column: &'static str,
}

/// Where a field's value comes from.
#[derive(Debug, PartialEq, Eq)]
pub enum FieldSource {
    /// A column of the entity's own table.
    Column(&'static str),
    /// A column of a joined relation.
    Joined {
        /// The relation to join.
        relation: &'static Relation,
        /// Column on the relation's table.
        column: &'static str,
    },
}

/// A requestable field.
#[derive(Debug, PartialEq, Eq)]
pub struct FieldDef {
    /// Public field name, e.g. `"roleId"` or `"role.name"`.
    pub name: &'static str,
    /// Storage location.
    pub source: FieldSource,
    /// Storage type.
    pub kind: FieldKind,
    /// Whether create/update requests may set this field.
    pub writable: bool,
}

impl FieldDef {
    /// A writable column on the base table.
    pub const fn column(name: &'static str, column: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            source: FieldSource::Column(column),
            kind,
            writable: true,
        }
    }

    /// A read-only column on the base table (keys, tokens, flags, audit stamps).
    pub const fn system(name: &'static str, column: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            source: FieldSource::Column(column),
            kind,
            writable: false,
        }
    }

    /// A virtual field read through a relation join.
    pub const fn joined(
        name: &'static str,
        relation: &'static Relation,
        column: &'static str,
        kind: FieldKind,
    ) -> Self {
        Self {
            name,
            source: FieldSource::Joined { relation, column },
            kind,
            writable: false,
        }
    }

    /// Resolve to a column reference.
    pub fn column_ref(&self) -> ColumnRef {
        match self.source {
            FieldSource::Column(column) => ColumnRef::base(column),
            FieldSource::Joined { relation, column } => ColumnRef {
                relation: Some(relation),
                column,
            },
        }
    }

    /// The relation this field requires, if any.
    pub fn relation(&self) -> Option<&'static Relation> {
        match self.source {
            FieldSource::Column(_) => None,
            FieldSource::Joined { relation, .. } => Some(relation),
        }
    }
}

/// A parent → child soft-delete cascade.
#[derive(Debug)]
pub struct CascadeRule {
    /// The dependent entity.
    pub child: &'static EntityDescriptor,
    /// Column on the child's table referencing the parent's id.
    pub foreign_key: &'static str,
    /// Tag written into the child's cascade column.
    pub reason: &'static str,
}

/// Static description of one entity type.
#[derive(Debug)]
pub struct EntityDescriptor {
    /// Singular entity name, used in messages and logs.
    pub name: &'static str,
    /// Backing table.
    pub table: &'static str,
    /// Every requestable field.
    pub fields: &'static [FieldDef],
    /// Fields returned when `select` is empty: id plus a human-readable name.
    pub identity: &'static [&'static str],
    /// Column recording the cascade reason, for entities deleted by cascade.
    pub cascade_column: Option<&'static str>,
    /// Dependents soft-deleted together with a row of this entity.
    pub cascades: &'static [CascadeRule],
}

impl EntityDescriptor {
    /// Look up a field by its public name.
    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Look up a field, failing with a `VALIDATION` error when unknown.
    pub fn require_field(&'static self, name: &str) -> AppResult<&'static FieldDef> {
        self.field(name).ok_or_else(|| {
            AppError::validation(format!("Unknown field '{name}' for entity '{}'", self.name))
        })
    }

    /// Resolve a field that create/update requests may write.
    pub fn writable_column(&'static self, name: &str) -> AppResult<&'static str> {
        let field = self.require_field(name)?;
        match field.source {
            FieldSource::Column(column) if field.writable => Ok(column),
            _ => Err(AppError::validation(format!(
                "Field '{name}' of entity '{}' is not writable",
                self.name
            ))),
        }
    }

    /// Build the projection for a `select` list.
    ///
    /// An empty list yields the identity fields. A non-empty list yields the
    /// requested fields in order, with `id` prepended when missing. Joins are
    /// added only for relations a projected field actually needs, and fields
    /// sharing a relation share one join.
    pub fn project(
        &'static self,
        select: &[String],
        policy: UnknownFieldPolicy,
    ) -> AppResult<Projection> {
        let mut projection = Projection::default();

        if select.is_empty() {
            for name in self.identity {
                projection.push(self.require_field(name)?);
            }
            return Ok(projection);
        }

        for name in select {
            match self.field(name) {
                Some(field) => projection.push(field),
                None => match policy {
                    UnknownFieldPolicy::Reject => {
                        return Err(AppError::validation(format!(
                            "Unknown field '{name}' in select for entity '{}'",
                            self.name
                        )));
                    }
                    UnknownFieldPolicy::Ignore => {
                        debug!(entity = self.name, field = %name, "Ignoring unknown select field");
                    }
                },
            }
        }

        if !projection.contains(ID_COLUMN) {
            projection.push_front(self.require_field(ID_COLUMN)?);
        }

        Ok(projection)
    }
}

/// A column on the base table or on a joined relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRef {
    /// The relation owning the column, `None` for the base table.
    pub relation: Option<&'static Relation>,
    /// Column name.
    pub column: &'static str,
}

impl ColumnRef {
    /// A column of the base table.
    pub const fn base(column: &'static str) -> Self {
        Self {
            relation: None,
            column,
        }
    }
}

/// A relation join and the columns projected from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    /// The joined relation.
    pub relation: &'static Relation,
    /// Columns read from the relation; empty when the join only serves a
    /// filter or a sort.
    pub columns: Vec<&'static str>,
}

/// The fields and joins a query reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    /// Projected fields, in output order.
    pub fields: Vec<&'static FieldDef>,
    /// Required joins, in first-use order.
    pub joins: Vec<Join>,
}

impl Projection {
    /// Whether a field with the given public name is projected.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Names of the projected fields.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    /// Ensure a relation is joined, without projecting any of its columns.
    pub fn require_join(&mut self, relation: &'static Relation) {
        self.join_mut(relation);
    }

    fn push(&mut self, field: &'static FieldDef) {
        if self.contains(field.name) {
            return;
        }
        self.note_join(field);
        self.fields.push(field);
    }

    fn push_front(&mut self, field: &'static FieldDef) {
        if self.contains(field.name) {
            return;
        }
        self.note_join(field);
        self.fields.insert(0, field);
    }

    fn note_join(&mut self, field: &'static FieldDef) {
        if let FieldSource::Joined { relation, column } = field.source {
            let join = self.join_mut(relation);
            if !join.columns.contains(&column) {
                join.columns.push(column);
            }
        }
    }

    fn join_mut(&mut self, relation: &'static Relation) -> &mut Join {
        let index = match self.joins.iter().position(|j| j.relation == relation) {
            Some(index) => index,
            None => {
                self.joins.push(Join {
                    relation,
                    columns: Vec::new(),
                });
                self.joins.len() - 1
            }
        };
        &mut self.joins[index]
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! A small two-entity registry used by this crate's tests.

    use super::*;

    pub static TEAM: Relation = Relation {
        name: "team",
        table: "teams",
        local_column: "team_id",
    };

    pub static PLAYER: EntityDescriptor = EntityDescriptor {
        name: "player",
        table: "players",
        fields: &[
            FieldDef::system("id", "id", FieldKind::Integer),
            FieldDef::system("guid", "guid", FieldKind::Text),
            FieldDef::system("isDeleted", "is_deleted", FieldKind::Bool),
            FieldDef::system("cascadeDeletedBy", "cascade_deleted_by", FieldKind::Text),
            FieldDef::column("name", "name", FieldKind::Text),
            FieldDef::column("email", "email", FieldKind::Text),
            FieldDef::column("teamId", "team_id", FieldKind::Integer),
            FieldDef::column("joinedAt", "joined_at", FieldKind::Date),
            FieldDef::joined("team.id", &TEAM, "id", FieldKind::Integer),
            FieldDef::joined("team.name", &TEAM, "name", FieldKind::Text),
        ],
        identity: &["id", "name"],
        cascade_column: Some("cascade_deleted_by"),
        cascades: &[],
    };

    pub static TEAMS: EntityDescriptor = EntityDescriptor {
        name: "team",
        table: "teams",
        fields: &[
            FieldDef::system("id", "id", FieldKind::Integer),
            FieldDef::system("guid", "guid", FieldKind::Text),
            FieldDef::system("isDeleted", "is_deleted", FieldKind::Bool),
            FieldDef::column("name", "name", FieldKind::Text),
        ],
        identity: &["id", "name"],
        cascade_column: None,
        cascades: &[],
    };
}

#[cfg(test)]
mod tests {
    use super::fixtures::{PLAYER, TEAM};
    use super::*;

    fn select(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_select_yields_identity() {
        let projection = PLAYER
            .project(&[], UnknownFieldPolicy::Reject)
            .expect("projection");
        assert_eq!(projection.field_names(), vec!["id", "name"]);
        assert!(projection.joins.is_empty());
    }

    #[test]
    fn test_relation_fields_share_one_join() {
        let projection = PLAYER
            .project(&select(&["team.id", "team.name", "email"]), UnknownFieldPolicy::Reject)
            .expect("projection");
        assert_eq!(projection.field_names(), vec!["id", "team.id", "team.name", "email"]);
        assert_eq!(
            projection.joins,
            vec![Join {
                relation: &TEAM,
                columns: vec!["id", "name"],
            }]
        );
    }

    #[test]
    fn test_unrequested_relation_is_not_joined() {
        let projection = PLAYER
            .project(&select(&["name", "teamId"]), UnknownFieldPolicy::Reject)
            .expect("projection");
        assert!(projection.joins.is_empty());
    }

    #[test]
    fn test_unknown_field_policy() {
        let err = PLAYER
            .project(&select(&["name", "nmae"]), UnknownFieldPolicy::Reject)
            .unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Validation);

        let projection = PLAYER
            .project(&select(&["name", "nmae"]), UnknownFieldPolicy::Ignore)
            .expect("projection");
        assert_eq!(projection.field_names(), vec!["id", "name"]);
    }

    #[test]
    fn test_writable_columns() {
        assert_eq!(PLAYER.writable_column("teamId").expect("writable"), "team_id");
        assert!(PLAYER.writable_column("guid").is_err());
        assert!(PLAYER.writable_column("team.name").is_err());
        assert!(PLAYER.writable_column("unknown").is_err());
    }
}
