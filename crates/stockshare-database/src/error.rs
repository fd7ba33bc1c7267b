//! Mapping of sqlx failures onto the application error taxonomy.

use stockshare_core::error::{AppError, ErrorKind};

/// Classify a sqlx error.
///
/// Unique violations become `Conflict`, connectivity failures become
/// `ServiceUnavailable`, and everything else is a `Database` error. The
/// driver text stays in the error source and never in the message.
pub fn classify(context: &str, err: sqlx::Error) -> AppError {
    let kind = match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => ErrorKind::Conflict,
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::WorkerCrashed => ErrorKind::ServiceUnavailable,
        _ => ErrorKind::Database,
    };

    let message = match kind {
        ErrorKind::ServiceUnavailable => "Database is unavailable".to_string(),
        _ => context.to_string(),
    };
    AppError::with_source(kind, message, err)
}

/// Whether the statement referenced a parent row that does not exist.
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}
