use crate::error::RelayError;
use crate::relay::Relay;

use super::engine::SqliteLoader;

const DEFAULT_WORKER_NAME: &str = "sql-relay-worker";

/// Options for the `SQLite` engine and the worker that owns it.
#[derive(Debug, Clone)]
pub struct SqliteOptions {
    /// Statements run on every freshly created database before `init` is acknowledged.
    pub init_sql: Vec<String>,
    pub worker_name: String,
}

impl Default for SqliteOptions {
    fn default() -> Self {
        Self {
            init_sql: Vec::new(),
            worker_name: DEFAULT_WORKER_NAME.to_string(),
        }
    }
}

impl SqliteOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_init_sql(mut self, sql: impl Into<String>) -> Self {
        self.init_sql.push(sql.into());
        self
    }

    /// Check the options before a worker is spawned with them.
    ///
    /// # Errors
    /// Returns `RelayError::ConfigError` if the worker name is empty or contains a NUL byte.
    pub fn validate(&self) -> Result<(), RelayError> {
        if self.worker_name.trim().is_empty() {
            return Err(RelayError::ConfigError(
                "worker name must not be empty".into(),
            ));
        }
        if self.worker_name.contains('\0') {
            return Err(RelayError::ConfigError(
                "worker name must not contain NUL bytes".into(),
            ));
        }
        Ok(())
    }
}

/// Fluent builder for `SQLite` options.
#[derive(Debug, Clone, Default)]
pub struct SqliteOptionsBuilder {
    opts: SqliteOptions,
}

impl SqliteOptionsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a statement (typically a `PRAGMA`) to run when the database is created.
    #[must_use]
    pub fn init_sql(mut self, sql: impl Into<String>) -> Self {
        self.opts.init_sql.push(sql.into());
        self
    }

    #[must_use]
    pub fn worker_name(mut self, name: impl Into<String>) -> Self {
        self.opts.worker_name = name.into();
        self
    }

    #[must_use]
    pub fn finish(self) -> SqliteOptions {
        self.opts
    }

    /// Spawn a relay whose `init` loads a `SQLite` database with these options.
    ///
    /// # Errors
    ///
    /// Returns `RelayError` if the options are invalid or the worker thread cannot be spawned.
    pub fn build(self) -> Result<Relay, RelayError> {
        Relay::sqlite(self.finish())
    }
}

impl Relay {
    #[must_use]
    pub fn sqlite_builder() -> SqliteOptionsBuilder {
        SqliteOptionsBuilder::new()
    }

    /// Spawn a relay backed by an in-memory `SQLite` database.
    ///
    /// # Errors
    /// Returns `RelayError::ConfigError` for invalid options, or `RelayError::ConnectionError`
    /// if the worker thread cannot be spawned.
    pub fn sqlite(opts: SqliteOptions) -> Result<Self, RelayError> {
        opts.validate()?;
        let worker_name = opts.worker_name.clone();
        Relay::spawn(SqliteLoader::new(opts), worker_name)
    }
}
