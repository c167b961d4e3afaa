//! Store trait for pluggable persistence backends.

use async_trait::async_trait;

use crate::query::QueryPlan;
use crate::registry::EntityDescriptor;
use crate::result::AppResult;
use crate::types::record::Record;
use crate::types::value::Value;

/// The minimal row state read when a guarded write affects nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowState {
    /// Current guid.
    pub guid: String,
    /// Soft-delete flag.
    pub is_deleted: bool,
}

/// Result of a guarded delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Whether the row itself was marked deleted.
    pub deleted: bool,
    /// Dependents marked deleted by cascade rules.
    pub cascaded: u64,
}

/// Trait for transactional entity stores (Postgres or in-process).
///
/// Column lists passed to writes are physical base-table columns already
/// checked against the descriptor. Guarded writes compare the guid and the
/// soft-delete flag inside the write itself and report whether a row was
/// affected; they never classify failures.
#[async_trait]
pub trait EntityStore: Send + Sync + 'static {
    /// Execute a list plan, returning the page rows and the total match count.
    async fn fetch_page(&self, plan: &QueryPlan) -> AppResult<(Vec<Record>, u64)>;

    /// Read `(guid, is_deleted)` of a row regardless of its deletion state.
    async fn fetch_state(
        &self,
        entity: &'static EntityDescriptor,
        id: i64,
    ) -> AppResult<Option<RowState>>;

    /// Insert a live row with the given guid and return its new id.
    async fn insert(
        &self,
        entity: &'static EntityDescriptor,
        columns: &[(&'static str, Value)],
        guid: &str,
    ) -> AppResult<i64>;

    /// Apply `columns` and `new_guid` when the row is live and its guid
    /// equals `expected_guid`. Returns `true` when a row was updated.
    async fn update_if_current(
        &self,
        entity: &'static EntityDescriptor,
        id: i64,
        expected_guid: &str,
        columns: &[(&'static str, Value)],
        new_guid: &str,
    ) -> AppResult<bool>;

    /// Soft-delete a live row whose guid equals `expected_guid`, together
    /// with the dependents its cascade rules name, in one transaction.
    async fn delete_if_current(
        &self,
        entity: &'static EntityDescriptor,
        id: i64,
        expected_guid: &str,
    ) -> AppResult<DeleteOutcome>;
}
