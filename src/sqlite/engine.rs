use rusqlite::Connection;

use crate::engine::{Engine, EngineLoader};
use crate::error::RelayError;
use crate::results::ResultSet;

use super::config::SqliteOptions;
use super::query::build_result_set;

/// An in-memory `SQLite` database driven through the engine seam.
pub struct SqliteEngine {
    conn: Connection,
}

impl SqliteEngine {
    /// Open a fresh, empty in-memory database.
    ///
    /// # Errors
    /// Returns `RelayError::SqliteError` if the database cannot be opened.
    pub fn open_in_memory() -> Result<Self, RelayError> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }
}

impl Engine for SqliteEngine {
    fn run(&mut self, sql: &str) -> Result<(), RelayError> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    fn exec(&mut self, sql: &str) -> Result<ResultSet, RelayError> {
        build_result_set(&self.conn, sql)
    }
}

/// Loads a [`SqliteEngine`] and applies the configured init statements.
#[derive(Debug, Clone, Default)]
pub struct SqliteLoader {
    opts: SqliteOptions,
}

impl SqliteLoader {
    #[must_use]
    pub fn new(opts: SqliteOptions) -> Self {
        Self { opts }
    }
}

impl EngineLoader for SqliteLoader {
    fn load(&self) -> Result<Box<dyn Engine>, RelayError> {
        let engine = SqliteEngine::open_in_memory()?;
        for sql in &self.opts.init_sql {
            tracing::debug!(sql = %sql, "applying init statement");
            engine.conn.execute_batch(sql)?;
        }
        Ok(Box::new(engine))
    }
}
