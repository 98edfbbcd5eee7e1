mod config;
mod error;
mod schema;
pub mod store;

pub use config::SqliteConfig;
pub use error::SqliteDaoError;
pub use store::SqliteActivityStore;

use crate::dao::storage::StorageError;

impl From<SqliteDaoError> for StorageError {
    fn from(err: SqliteDaoError) -> Self {
        match err {
            SqliteDaoError::UniqueViolation { table, .. } => {
                StorageError::conflict(format!("duplicate key in `{table}`"))
            }
            other => StorageError::unavailable(other.to_string(), other),
        }
    }
}
