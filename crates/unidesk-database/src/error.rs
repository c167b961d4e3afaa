//! Classification of store failures.
//!
//! Every sqlx error raised by this crate passes through [`map_sqlx`], so
//! constraint violations surface as `VALIDATION` and everything else as
//! `DATABASE` no matter which query failed.

use sqlx::error::ErrorKind as SqlxErrorKind;

use unidesk_core::error::{AppError, ErrorKind};

/// Map a sqlx error raised while doing `context`.
pub fn map_sqlx(context: &str, err: sqlx::Error) -> AppError {
    let violation = match &err {
        sqlx::Error::Database(db) => {
            let what = match db.kind() {
                SqlxErrorKind::UniqueViolation => Some("duplicate value"),
                SqlxErrorKind::ForeignKeyViolation => Some("referenced row does not exist"),
                SqlxErrorKind::NotNullViolation => Some("required value missing"),
                SqlxErrorKind::CheckViolation => Some("value rejected by check constraint"),
                _ => None,
            };
            what.map(|what| match db.constraint() {
                Some(constraint) => format!("{context}: {what} ({constraint})"),
                None => format!("{context}: {what}"),
            })
        }
        _ => None,
    };

    match violation {
        Some(message) => AppError::with_source(ErrorKind::Validation, message, err),
        None => AppError::with_source(ErrorKind::Database, format!("{context}: {err}"), err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_constraint_errors_are_database() {
        let err = map_sqlx("Failed to list users", sqlx::Error::PoolTimedOut);
        assert_eq!(err.kind, ErrorKind::Database);
        assert!(err.message.starts_with("Failed to list users"));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_row_not_found_is_database() {
        let err = map_sqlx("Failed to insert", sqlx::Error::RowNotFound);
        assert_eq!(err.kind, ErrorKind::Database);
    }
}
