use std::{path::PathBuf, str::FromStr, time::Duration};

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};

use super::error::{SqliteDaoError, SqliteResult};

const DEFAULT_MAX_CONNECTIONS: u32 = 8;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Runtime configuration describing which SQLite database to open.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    pub options: SqliteConnectOptions,
    pub max_connections: u32,
    /// In-memory databases live as long as their single connection.
    pub in_memory: bool,
}

impl SqliteConfig {
    /// Open (or create) the database file at `path`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(path.into())
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        Self {
            options,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            in_memory: false,
        }
    }

    /// A private in-memory database, used by tests.
    pub fn in_memory() -> SqliteResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|source| SqliteDaoError::InvalidOptions { source })?
            .foreign_keys(true);

        Ok(Self {
            options,
            max_connections: 1,
            in_memory: true,
        })
    }
}
