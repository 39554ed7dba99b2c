//! A message-passing relay in front of an embedded SQL engine.
//!
//! A [`Relay`] owns a worker thread. The worker receives `{id, method, sql?}` messages,
//! loads the engine on `init`, runs `execute`/`query` against it, and posts exactly one
//! `{id, result}` or `{id, error}` response per message.
//!
//! ```rust,no_run
//! use sql_relay::prelude::*;
//!
//! # async fn demo() -> Result<(), RelayError> {
//! let client = RelayClient::new(Relay::sqlite_builder().build()?)?;
//! client.init().await?;
//! client.execute("CREATE TABLE t(x INT); INSERT INTO t VALUES (5)").await?;
//! let rows = client.query("SELECT x FROM t").await?;
//! assert_eq!(rows.statements[0].values, vec![vec![CellValue::Int(5)]]);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod engine;
pub mod error;
pub mod prelude;
pub mod protocol;
pub mod relay;
pub mod results;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod types;

pub use client::RelayClient;
pub use error::RelayError;
pub use relay::Relay;
