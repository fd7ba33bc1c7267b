//! Convenience result type alias for StockShare.

use crate::error::AppError;

/// A specialized `Result` type for StockShare operations.
pub type AppResult<T> = Result<T, AppError>;
