//! Shared Diesel error mapping for the repositories in this module.
//!
//! Each repository supplies constructors for its own port error so the
//! classification of Diesel failures lives in one place.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Constructors for the port error a repository reports.
pub(super) struct ErrorConstructors<E> {
    pub connection: fn(String) -> E,
    pub query: fn(String) -> E,
    /// Receives the violated constraint name, or the database message when
    /// the driver does not report one.
    pub unique_violation: fn(String) -> E,
}

/// Map a pool failure to the repository's connection error.
pub(super) fn map_pool_error<E>(error: PoolError, ctors: &ErrorConstructors<E>) -> E {
    (ctors.connection)(error.into_message())
}

/// Classify a Diesel failure.
pub(super) fn map_diesel_error<E>(error: DieselError, ctors: &ErrorConstructors<E>) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            let name = info
                .constraint_name()
                .map_or_else(|| info.message().to_owned(), str::to_owned);
            (ctors.unique_violation)(name)
        }
        DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection | DatabaseErrorKind::UnableToSendCommand,
            _,
        ) => (ctors.connection)("database connection error".to_owned()),
        DieselError::NotFound => (ctors.query)("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => (ctors.query)("database query error".to_owned()),
        DieselError::DeserializationError(_) | DieselError::SerializationError(_) => {
            (ctors.query)("stored row could not be decoded".to_owned())
        }
        _ => (ctors.query)("database error".to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Probe {
        Connection(String),
        Query(String),
        Unique(String),
    }

    const CTORS: ErrorConstructors<Probe> = ErrorConstructors {
        connection: Probe::Connection,
        query: Probe::Query,
        unique_violation: Probe::Unique,
    };

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let mapped = map_pool_error(PoolError::checkout("timed out"), &CTORS);
        assert_eq!(mapped, Probe::Connection("timed out".to_owned()));
    }

    #[rstest]
    fn unique_violations_carry_the_database_message_without_a_constraint() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value".to_owned()),
        );
        assert_eq!(
            map_diesel_error(error, &CTORS),
            Probe::Unique("duplicate key value".to_owned())
        );
    }

    #[rstest]
    fn closed_connections_are_connection_errors() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        );
        assert!(matches!(map_diesel_error(error, &CTORS), Probe::Connection(_)));
    }

    #[rstest]
    #[case(DieselError::NotFound, "record not found")]
    #[case(DieselError::RollbackTransaction, "database error")]
    fn other_failures_are_query_errors(#[case] error: DieselError, #[case] message: &str) {
        assert_eq!(
            map_diesel_error(error, &CTORS),
            Probe::Query(message.to_owned())
        );
    }
}
