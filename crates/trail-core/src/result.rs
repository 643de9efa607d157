//! Convenience result type alias for the audit trail engine.

use crate::error::AppError;

/// A specialized `Result` type for audit trail operations.
pub type AppResult<T> = Result<T, AppError>;
