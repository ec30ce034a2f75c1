//! Translation of pool and Diesel failures into [`RepositoryError`].

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::RepositoryError;
use crate::domain::value_object::ValueObjectError;

use super::pool::PoolError;

pub(crate) fn map_pool_error(error: PoolError) -> RepositoryError {
    RepositoryError::connection(error.message())
}

/// Map a Diesel error, keeping driver detail out of the returned message.
///
/// Unique violations become [`RepositoryError::Conflict`] so the service can
/// report a taken pet identifier.
pub(crate) fn map_diesel_error(error: DieselError) -> RepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, detail = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            RepositoryError::conflict(info.constraint_name().map_or_else(
                || "unique constraint violated".to_owned(),
                |name| format!("unique constraint {name} violated"),
            ))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RepositoryError::connection("database connection error")
        }
        DieselError::NotFound => RepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => RepositoryError::query("database query error"),
        _ => RepositoryError::query("database error"),
    }
}

/// A stored column that no longer passes value-object validation.
pub(crate) fn corrupt(column: &'static str, error: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::corrupt_record(format!("{column}: {error}"))
}

pub(crate) fn corrupt_value(column: &'static str) -> impl Fn(ValueObjectError) -> RepositoryError {
    move |error| corrupt(column, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug)]
    struct Info(Option<&'static str>);

    impl diesel::result::DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            "duplicate key value"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("pets")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.0
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info(constraint)))
    }

    #[rstest]
    fn unique_violations_are_conflicts() {
        let error = map_diesel_error(database_error(
            DatabaseErrorKind::UniqueViolation,
            Some("pets_identifier_key"),
        ));
        assert_eq!(
            error,
            RepositoryError::conflict("unique constraint pets_identifier_key violated")
        );
    }

    #[rstest]
    #[case(
        database_error(DatabaseErrorKind::ClosedConnection, None),
        RepositoryError::connection("database connection error")
    )]
    #[case(DieselError::NotFound, RepositoryError::query("record not found"))]
    #[case(
        database_error(DatabaseErrorKind::ForeignKeyViolation, None),
        RepositoryError::query("database error")
    )]
    fn other_failures_hide_driver_detail(
        #[case] error: DieselError,
        #[case] expected: RepositoryError,
    ) {
        assert_eq!(map_diesel_error(error), expected);
    }

    #[rstest]
    fn pool_failures_are_connection_errors() {
        assert_eq!(
            map_pool_error(PoolError::checkout("timed out")),
            RepositoryError::connection("timed out")
        );
    }
}
