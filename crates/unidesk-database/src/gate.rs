//! Optimistic concurrency gate.
//!
//! Updates and deletes are conditional writes keyed by `(id, guid)`. When
//! such a write affects no row, the gate reads the row's `(guid, is_deleted)`
//! and explains why with one of `NOT_FOUND`, `ALREADY_DELETED` or
//! `GUID_CHANGED`.

use std::fmt;

use unidesk_core::config::GuidMismatchPolicy;
use unidesk_core::error::AppError;
use unidesk_core::registry::EntityDescriptor;
use unidesk_core::result::AppResult;
use unidesk_core::traits::RowState;

/// A write guarded by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardedOp {
    /// Field update with guid rotation.
    Update,
    /// Soft delete.
    Delete,
}

impl fmt::Display for GuardedOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Decision table for guarded writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcurrencyGate {
    delete_mismatch: GuidMismatchPolicy,
}

impl ConcurrencyGate {
    /// Create a gate reporting delete guid mismatches per `delete_mismatch`.
    pub fn new(delete_mismatch: GuidMismatchPolicy) -> Self {
        Self { delete_mismatch }
    }

    /// Decide whether a write with `supplied` may proceed against `state`.
    pub fn check(
        &self,
        entity: &EntityDescriptor,
        id: i64,
        op: GuardedOp,
        state: Option<&RowState>,
        supplied: &str,
    ) -> AppResult<()> {
        let Some(state) = state else {
            return Err(AppError::not_found(format!("{} {id} not found", entity.name)));
        };
        if state.is_deleted {
            return Err(AppError::already_deleted(format!(
                "{} {id} is already deleted",
                entity.name
            )));
        }
        if state.guid != supplied {
            return Err(match (op, self.delete_mismatch) {
                (GuardedOp::Delete, GuidMismatchPolicy::AlreadyDeleted) => {
                    AppError::already_deleted(format!(
                        "{} {id} was modified or deleted by someone else",
                        entity.name
                    ))
                }
                _ => AppError::guid_changed(format!(
                    "{} {id} was modified by someone else",
                    entity.name
                )),
            });
        }
        Ok(())
    }

    /// Explain a guarded write that affected no row.
    ///
    /// The state is read after the write. A live row still carrying the
    /// supplied guid does not explain the miss and is reported as a
    /// concurrent modification.
    pub fn reject(
        &self,
        entity: &EntityDescriptor,
        id: i64,
        op: GuardedOp,
        state: Option<&RowState>,
        supplied: &str,
    ) -> AppError {
        match self.check(entity, id, op, state, supplied) {
            Err(err) => err,
            Ok(()) => AppError::guid_changed(format!(
                "{} {id} changed during {op}",
                entity.name
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use unidesk_core::error::ErrorKind;
    use unidesk_entity::user::DESCRIPTOR as USERS;

    use super::*;

    fn state(guid: &str, is_deleted: bool) -> RowState {
        RowState {
            guid: guid.into(),
            is_deleted,
        }
    }

    fn kind(result: AppResult<()>) -> Option<ErrorKind> {
        result.err().map(|e| e.kind)
    }

    #[test]
    fn test_decision_table() {
        let gate = ConcurrencyGate::default();
        let live = state("g1", false);
        let deleted = state("g1", true);

        for op in [GuardedOp::Update, GuardedOp::Delete] {
            assert_eq!(kind(gate.check(&USERS, 1, op, None, "g1")), Some(ErrorKind::NotFound));
            assert_eq!(
                kind(gate.check(&USERS, 1, op, Some(&deleted), "g1")),
                Some(ErrorKind::AlreadyDeleted)
            );
            assert_eq!(kind(gate.check(&USERS, 1, op, Some(&live), "g1")), None);
        }

        assert_eq!(
            kind(gate.check(&USERS, 1, GuardedOp::Update, Some(&live), "g0")),
            Some(ErrorKind::GuidChanged)
        );
    }

    #[test]
    fn test_deleted_wins_over_guid_mismatch() {
        let gate = ConcurrencyGate::default();
        assert_eq!(
            kind(gate.check(&USERS, 1, GuardedOp::Update, Some(&state("g2", true)), "g1")),
            Some(ErrorKind::AlreadyDeleted)
        );
    }

    #[test]
    fn test_delete_mismatch_policy() {
        let live = state("g2", false);
        let legacy = ConcurrencyGate::new(GuidMismatchPolicy::AlreadyDeleted);
        assert_eq!(
            kind(legacy.check(&USERS, 1, GuardedOp::Delete, Some(&live), "g1")),
            Some(ErrorKind::AlreadyDeleted)
        );

        let strict = ConcurrencyGate::new(GuidMismatchPolicy::GuidChanged);
        assert_eq!(
            kind(strict.check(&USERS, 1, GuardedOp::Delete, Some(&live), "g1")),
            Some(ErrorKind::GuidChanged)
        );
    }

    #[test]
    fn test_reject_never_proceeds() {
        let gate = ConcurrencyGate::default();
        let err = gate.reject(&USERS, 1, GuardedOp::Update, Some(&state("g1", false)), "g1");
        assert_eq!(err.kind, ErrorKind::GuidChanged);
    }
}
