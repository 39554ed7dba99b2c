//! Convenient imports for common functionality.

pub use crate::client::RelayClient;
pub use crate::engine::{Engine, EngineLoader};
pub use crate::error::RelayError;
pub use crate::protocol::{CorrelationId, Operation, Outcome, Payload, Request, Response};
pub use crate::relay::{Relay, RelayContext, RelaySender};
pub use crate::results::{ResultSet, StatementResult};
pub use crate::types::CellValue;

#[cfg(feature = "sqlite")]
pub use crate::sqlite::{SqliteEngine, SqliteLoader, SqliteOptions, SqliteOptionsBuilder};
