//! Error types shared by the SQLite storage implementation.

use thiserror::Error;

/// Convenient result alias returning [`SqliteDaoError`] failures.
pub type SqliteResult<T> = Result<T, SqliteDaoError>;

/// Failures that can occur while interacting with SQLite.
#[derive(Debug, Error)]
pub enum SqliteDaoError {
    /// Connection options could not be built.
    #[error("invalid SQLite connection options")]
    InvalidOptions {
        #[source]
        source: sqlx::Error,
    },
    /// Opening the connection pool failed.
    #[error("failed to open SQLite database")]
    Connect {
        #[source]
        source: sqlx::Error,
    },
    /// Applying the schema failed.
    #[error("failed to apply SQLite schema")]
    Schema {
        #[source]
        source: sqlx::Error,
    },
    /// A unique index rejected an insert.
    #[error("unique constraint violated on `{table}`")]
    UniqueViolation {
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },
    /// Any other statement failure.
    #[error("SQLite query `{operation}` failed")]
    Query {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl SqliteDaoError {
    /// Wrap a statement failure, singling out unique-constraint violations on inserts.
    pub fn from_insert(table: &'static str, source: sqlx::Error) -> Self {
        let unique = source
            .as_database_error()
            .is_some_and(|db_err| db_err.is_unique_violation());
        if unique {
            SqliteDaoError::UniqueViolation { table, source }
        } else {
            SqliteDaoError::Query {
                operation: table,
                source,
            }
        }
    }

    /// Wrap a read or update failure.
    pub fn query(operation: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| SqliteDaoError::Query { operation, source }
    }
}
