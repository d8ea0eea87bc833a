//! Convenience result type alias for LinkShare.

use crate::error::AppError;

/// A specialized `Result` type for LinkShare operations.
pub type AppResult<T> = Result<T, AppError>;
