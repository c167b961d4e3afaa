//! Convenience result type alias for Unidesk.

use crate::error::AppError;

/// A specialized `Result` type for Unidesk operations.
pub type AppResult<T> = Result<T, AppError>;
