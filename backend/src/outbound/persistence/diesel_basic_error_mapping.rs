//! Shared Diesel and pool error classification for the repositories.
//!
//! Repositories translate a [`DieselFailure`] into their own port error so
//! driver messages never reach the domain; only the failure kind is logged.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Coarse classification of a failed Diesel operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The connection dropped mid-operation.
    Connection,
    /// A unique constraint rejected the write.
    UniqueViolation { constraint: Option<String> },
    /// Any other query, mapping or constraint failure.
    Query(&'static str),
}

/// Classify a Diesel error, logging its kind at debug level.
pub(crate) fn classify_diesel_error(error: DieselError, operation: &'static str) -> DieselFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, constraint = info.constraint_name(), %operation, "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            %operation,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DieselFailure::UniqueViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        DieselError::DeserializationError(_) => DieselFailure::Query("row decoding error"),
        _ => DieselFailure::Query("database error"),
    }
}

/// Extract the pool failure message for a repository connection error.
pub(crate) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}


#[cfg(test)]
mod tests {
    use super::test_errors::database_error;
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unique_violations_keep_constraint_name() {
        let failure = classify_diesel_error(
            database_error(DatabaseErrorKind::UniqueViolation, Some("users_email_key")),
            "insert user",
        );
        assert_eq!(
            failure,
            DieselFailure::UniqueViolation {
                constraint: Some("users_email_key".to_owned())
            }
        );
    }

    #[rstest]
    #[case(database_error(DatabaseErrorKind::ClosedConnection, None), DieselFailure::Connection)]
    #[case(DieselError::NotFound, DieselFailure::Query("record not found"))]
    #[case(
        database_error(DatabaseErrorKind::CheckViolation, Some("test_cases_status_check")),
        DieselFailure::Query("database error")
    )]
    fn other_failures_are_classified(#[case] error: DieselError, #[case] expected: DieselFailure) {
        assert_eq!(classify_diesel_error(error, "test"), expected);
    }

    #[rstest]
    fn pool_messages_are_preserved() {
        assert_eq!(
            pool_error_message(PoolError::checkout("timed out")),
            "timed out"
        );
    }
}
