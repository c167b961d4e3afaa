//! Field checks shared by create and update payloads.

use unidesk_core::{AppError, AppResult};

/// Reject blank text.
pub fn require_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("'{field}' must not be empty")));
    }
    Ok(())
}

/// Reject blank text when a value is supplied.
pub fn require_text_opt(field: &str, value: Option<&str>) -> AppResult<()> {
    value.map_or(Ok(()), |v| require_text(field, v))
}

/// Reject values that are not shaped like `local@domain`.
pub fn check_email(field: &str, value: &str) -> AppResult<()> {
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(AppError::validation(format!(
            "'{field}' is not a valid email address"
        ))),
    }
}

/// Check an email when a value is supplied.
pub fn check_email_opt(field: &str, value: Option<&str>) -> AppResult<()> {
    value.map_or(Ok(()), |v| check_email(field, v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert!(require_text("name", "Ann").is_ok());
        assert!(require_text("name", "  ").is_err());
        assert!(require_text_opt("name", None).is_ok());
    }

    #[test]
    fn test_check_email() {
        assert!(check_email("email", "ann@uni.edu").is_ok());
        assert!(check_email("email", "ann.uni.edu").is_err());
        assert!(check_email("email", "@uni.edu").is_err());
        assert!(check_email("email", "ann@localhost").is_err());
    }
}
