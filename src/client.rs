//! The controlling-context side of a relay.
//!
//! [`RelayClient`] stamps each request with a fresh id and routes every posted response back
//! to the caller waiting on that id, so concurrent requests never see each other's results.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};

use crate::error::RelayError;
use crate::protocol::{Operation, Payload, Request, Response};
use crate::relay::{Relay, RelaySender};
use crate::results::ResultSet;

type PendingMap = Arc<Mutex<HashMap<String, oneshot::Sender<Response>>>>;

pub struct RelayClient {
    sender: RelaySender,
    pending: PendingMap,
    next_id: AtomicU64,
}

impl RelayClient {
    /// Take over a relay's response stream.
    ///
    /// The routing task is spawned on the current tokio runtime.
    ///
    /// # Errors
    /// Returns [`RelayError::ConnectionError`] when called outside a tokio runtime.
    pub fn new(relay: Relay) -> Result<Self, RelayError> {
        let handle = Handle::try_current().map_err(|err| {
            RelayError::ConnectionError(format!("relay client needs a tokio runtime: {err}"))
        })?;
        let (sender, responses) = relay.into_parts();
        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
        handle.spawn(route_responses(responses, Arc::clone(&pending)));
        Ok(Self {
            sender,
            pending,
            next_id: AtomicU64::new(1),
        })
    }

    /// Send `init` and wait for the database to be created.
    ///
    /// # Errors
    /// Returns [`RelayError::Engine`] if the worker reported a load failure, or
    /// [`RelayError::ConnectionError`] if the worker stopped.
    pub async fn init(&self) -> Result<(), RelayError> {
        expect_ack(self.call(Operation::Init).await?)
    }

    /// Run statements that produce no row set.
    ///
    /// # Errors
    /// Returns [`RelayError::Engine`] with the engine's error text on failure.
    pub async fn execute(&self, sql: impl Into<String>) -> Result<(), RelayError> {
        expect_ack(self.call(Operation::Execute { sql: sql.into() }).await?)
    }

    /// Run statements and collect their rows.
    ///
    /// # Errors
    /// Returns [`RelayError::Engine`] with the engine's error text on failure.
    pub async fn query(&self, sql: impl Into<String>) -> Result<ResultSet, RelayError> {
        match self.call(Operation::Query { sql: sql.into() }).await? {
            Payload::Rows(rows) => Ok(rows),
            Payload::Ack(_) => Err(RelayError::ExecutionError(
                "expected rows, received an acknowledgement".into(),
            )),
        }
    }

    /// Send an operation with a fresh id and return the raw response.
    ///
    /// # Errors
    /// Returns [`RelayError::ConnectionError`] if the worker stopped before responding.
    pub async fn request(&self, operation: Operation) -> Result<Response, RelayError> {
        let id = Value::from(self.next_id.fetch_add(1, Ordering::Relaxed));
        let request = Request::new(id, operation);
        self.dispatch(serde_json::to_value(&request)?, &request.id)
            .await
    }

    /// Send an arbitrary message and wait for the response carrying its `id`.
    ///
    /// Ids chosen here share the routing table with generated ones; callers mixing the two
    /// should use non-numeric ids.
    ///
    /// # Errors
    /// Returns [`RelayError::ConnectionError`] if the worker stopped before responding, or
    /// [`RelayError::ProtocolError`] if another request with the same id is in flight.
    pub async fn send_raw(&self, message: Value) -> Result<Response, RelayError> {
        let id = message.get("id").cloned().unwrap_or(Value::Null);
        self.dispatch(message, &id).await
    }

    async fn call(&self, operation: Operation) -> Result<Payload, RelayError> {
        self.request(operation).await?.into_result()
    }

    async fn dispatch(&self, message: Value, id: &Value) -> Result<Response, RelayError> {
        let key = id.to_string();
        let (tx, rx) = oneshot::channel();
        {
            let mut pending = lock(&self.pending);
            if pending.contains_key(&key) {
                return Err(RelayError::ProtocolError(format!(
                    "request {key} is already in flight"
                )));
            }
            pending.insert(key.clone(), tx);
        }

        if let Err(err) = self.sender.post(message) {
            lock(&self.pending).remove(&key);
            return Err(err);
        }

        rx.await.map_err(|_| {
            RelayError::ConnectionError(format!("relay worker dropped request {key}"))
        })
    }
}

async fn route_responses(mut responses: mpsc::UnboundedReceiver<Response>, pending: PendingMap) {
    while let Some(response) = responses.recv().await {
        let key = response.id.to_string();
        let waiter = lock(&pending).remove(&key);
        match waiter {
            Some(tx) => {
                let _ = tx.send(response);
            }
            None => tracing::warn!(id = %key, "response with no pending request"),
        }
    }
    // Worker gone: wake every waiter with a closed channel.
    lock(&pending).clear();
}

fn lock(pending: &PendingMap) -> MutexGuard<'_, HashMap<String, oneshot::Sender<Response>>> {
    match pending.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn expect_ack(payload: Payload) -> Result<(), RelayError> {
    match payload {
        Payload::Ack(_) => Ok(()),
        Payload::Rows(_) => Err(RelayError::ExecutionError(
            "expected an acknowledgement, received rows".into(),
        )),
    }
}
