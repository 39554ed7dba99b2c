// SQLite engine - the rusqlite-backed implementation of the engine seam
//
// - config: options and the fluent builder that spawns a relay
// - query: row extraction and per-statement result collection
// - engine: the `Engine` and `EngineLoader` implementations

pub mod config;
pub mod engine;
pub mod query;

pub use config::{SqliteOptions, SqliteOptionsBuilder};
pub use engine::{SqliteEngine, SqliteLoader};
pub use query::{build_result_set, sqlite_extract_value};
