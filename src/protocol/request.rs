use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RelayError;

use super::CorrelationId;

const METHODS: [&str; 3] = ["init", "execute", "query"];

/// Operation requested by an inbound message, discriminated by `method`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum Operation {
    /// Load the embedded engine and create the database.
    Init,
    /// Run statements that produce no row set (DDL/DML).
    Execute { sql: String },
    /// Run statements and collect their rows.
    Query { sql: String },
}

impl Operation {
    #[must_use]
    pub fn method(&self) -> &'static str {
        match self {
            Operation::Init => "init",
            Operation::Execute { .. } => "execute",
            Operation::Query { .. } => "query",
        }
    }
}

/// A validated inbound message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub id: CorrelationId,
    #[serde(flatten)]
    pub operation: Operation,
}

/// An inbound message that failed validation, with whatever id could be read from it.
#[derive(Debug)]
pub struct Rejected {
    pub id: CorrelationId,
    pub error: RelayError,
}

impl Request {
    #[must_use]
    pub fn new(id: impl Into<CorrelationId>, operation: Operation) -> Self {
        Self {
            id: id.into(),
            operation,
        }
    }

    /// Validate an untyped inbound message.
    ///
    /// # Errors
    /// Returns [`Rejected`] when the message is not an object, names an unknown `method`, or
    /// lacks the `sql` text that `execute` and `query` require. The rejection keeps the
    /// message's `id` (or `null`) so a response can still be correlated.
    pub fn decode(message: Value) -> Result<Self, Rejected> {
        let Some(fields) = message.as_object() else {
            return Err(Rejected {
                id: Value::Null,
                error: RelayError::ProtocolError("message must be a JSON object".into()),
            });
        };
        let id = fields.get("id").cloned().unwrap_or(Value::Null);

        match fields.get("method") {
            Some(Value::String(method)) if METHODS.contains(&method.as_str()) => {}
            Some(Value::String(method)) => {
                return Err(Rejected {
                    id,
                    error: RelayError::ProtocolError(format!("unknown method `{method}`")),
                });
            }
            Some(_) => {
                return Err(Rejected {
                    id,
                    error: RelayError::ProtocolError("`method` must be a string".into()),
                });
            }
            None => {
                return Err(Rejected {
                    id,
                    error: RelayError::ProtocolError("missing `method`".into()),
                });
            }
        }

        serde_json::from_value(message).map_err(|err| Rejected {
            id,
            error: RelayError::from(err),
        })
    }
}
