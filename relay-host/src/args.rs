use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing::Level;

#[derive(Debug, Clone, Copy, ValueEnum, Serialize)]
pub(crate) enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Relay newline-delimited JSON requests on stdin to an embedded SQLite database"
)]
pub(crate) struct Args {
    /// Also append log output to this file.
    #[arg(long)]
    pub(crate) log: Option<PathBuf>,
    #[arg(long, value_enum, default_value = "info")]
    pub(crate) level: LogLevel,
    /// Statement run on the database when `init` creates it; repeatable.
    #[arg(long = "init-sql")]
    pub(crate) init_sql: Vec<String>,
    #[arg(long, default_value = "sql-relay-worker")]
    pub(crate) worker_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct HostConfig {
    pub(crate) log: Option<PathBuf>,
    pub(crate) level: LogLevel,
    pub(crate) init_sql: Vec<String>,
    pub(crate) worker_name: String,
}

impl HostConfig {
    pub(crate) fn from_args(args: Args) -> Self {
        HostConfig {
            log: args.log,
            level: args.level,
            init_sql: args.init_sql,
            worker_name: args.worker_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_init_sql() {
        let args = Args::parse_from([
            "relay-host",
            "--init-sql",
            "PRAGMA foreign_keys = ON",
            "--init-sql",
            "PRAGMA temp_store = MEMORY",
            "--level",
            "debug",
        ]);
        let config = HostConfig::from_args(args);
        assert_eq!(config.init_sql.len(), 2);
        assert!(matches!(config.level, LogLevel::Debug));
        assert_eq!(config.worker_name, "sql-relay-worker");
    }
}
