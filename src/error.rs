use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[error("database not initialized; send `init` first")]
    NotInitialized,

    #[error("Protocol error: {0}")]
    ProtocolError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    /// Error text carried back in an `{id, error}` response.
    #[error("{0}")]
    Engine(String),
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::ProtocolError(err.to_string())
    }
}
