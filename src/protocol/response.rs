use serde::{Deserialize, Serialize};

use crate::error::RelayError;
use crate::results::ResultSet;

use super::CorrelationId;

/// Success payload of a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    /// `true` acknowledgement sent for `init` and `execute`
    Ack(bool),
    /// Rows produced by `query`
    Rows(ResultSet),
}

/// Exactly one of `result` or `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Result(Payload),
    Error(String),
}

/// Outbound message, `{id, result}` or `{id, error}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub id: CorrelationId,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl Response {
    #[must_use]
    pub fn ack(id: CorrelationId) -> Self {
        Self {
            id,
            outcome: Outcome::Result(Payload::Ack(true)),
        }
    }

    #[must_use]
    pub fn rows(id: CorrelationId, rows: ResultSet) -> Self {
        Self {
            id,
            outcome: Outcome::Result(Payload::Rows(rows)),
        }
    }

    #[must_use]
    pub fn error(id: CorrelationId, err: &RelayError) -> Self {
        Self {
            id,
            outcome: Outcome::Error(err.to_string()),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error(_))
    }

    /// Convert into the payload, turning an error response into [`RelayError::Engine`].
    ///
    /// # Errors
    /// Returns [`RelayError::Engine`] carrying the response's error text.
    pub fn into_result(self) -> Result<Payload, RelayError> {
        match self.outcome {
            Outcome::Result(payload) => Ok(payload),
            Outcome::Error(message) => Err(RelayError::Engine(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::StatementResult;
    use crate::types::CellValue;
    use serde_json::json;

    #[test]
    fn ack_and_error_shapes() {
        let ack = serde_json::to_value(Response::ack(json!(1))).unwrap();
        assert_eq!(ack, json!({"id": 1, "result": true}));

        let err = Response::error(json!("x"), &RelayError::NotInitialized);
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["id"], json!("x"));
        assert!(value.get("result").is_none());
        assert!(!value["error"].as_str().unwrap().is_empty());
    }

    #[test]
    fn rows_parse_back_from_wire() {
        let wire = json!({"id": 4, "result": [{"columns": ["x"], "values": [[5]]}]});
        let response: Response = serde_json::from_value(wire).unwrap();

        let mut expected = StatementResult::new(vec!["x".into()]);
        expected.push_row(vec![CellValue::Int(5)]);
        assert_eq!(
            response.into_result().unwrap(),
            Payload::Rows(ResultSet::from(vec![expected]))
        );
    }

    #[test]
    fn error_parses_into_engine_error() {
        let wire = json!({"id": 5, "error": "no such table: nosuchtable"});
        let response: Response = serde_json::from_value(wire).unwrap();
        assert!(response.is_error());
        match response.into_result() {
            Err(RelayError::Engine(message)) => assert!(message.contains("nosuchtable")),
            other => panic!("expected engine error, got {other:?}"),
        }
    }
}
