//! Convenience result type alias for Noticeboard.

use crate::error::AppError;

/// A specialized `Result` type for Noticeboard operations.
pub type AppResult<T> = Result<T, AppError>;
