//! Shared Diesel error classification for the repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors through a repository's connection constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map Diesel failures that carry no domain meaning.
///
/// Closed connections become connection errors; everything else is a query
/// error with a generic message. Driver details go to the debug log only.
pub(crate) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

/// A named constraint that rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConstraintFailure<'a> {
    Unique(&'a str),
    Check(&'a str),
    ForeignKey(&'a str),
}

/// Identify constraint violations reported with a constraint name.
pub(crate) fn constraint_failure(error: &DieselError) -> Option<ConstraintFailure<'_>> {
    let DieselError::DatabaseError(kind, info) = error else {
        return None;
    };
    let name = info.constraint_name()?;
    match kind {
        DatabaseErrorKind::UniqueViolation => Some(ConstraintFailure::Unique(name)),
        DatabaseErrorKind::CheckViolation => Some(ConstraintFailure::Check(name)),
        DatabaseErrorKind::ForeignKeyViolation => Some(ConstraintFailure::ForeignKey(name)),
        _ => None,
    }
}
