use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;

use crate::engine::EngineLoader;
use crate::error::RelayError;
use crate::protocol::{Request, Response};

mod channel;
mod dispatcher;
mod manager;

pub use dispatcher::RelayContext;

use manager::RelayWorker;

/// A relay worker: a dedicated thread owning the embedded database, fed with inbound
/// messages and posting one [`Response`] per message.
///
/// Dropping the relay (and every [`RelaySender`] cloned from it) shuts the worker down once
/// it has handled the messages already queued.
pub struct Relay {
    sender: RelaySender,
    responses: mpsc::UnboundedReceiver<Response>,
}

impl Relay {
    /// Spawn a worker thread whose `init` loads an engine through `loader`.
    ///
    /// # Errors
    /// Returns [`RelayError::ConnectionError`] if the worker thread cannot be spawned.
    pub fn spawn(
        loader: impl EngineLoader,
        worker_name: impl Into<String>,
    ) -> Result<Self, RelayError> {
        let (outbound, responses) = mpsc::unbounded_channel();
        let worker = RelayWorker::spawn(Box::new(loader), worker_name.into(), outbound)?;
        Ok(Self {
            sender: RelaySender {
                worker: Arc::new(worker),
            },
            responses,
        })
    }

    /// Post an untyped message to the worker's inbound queue.
    ///
    /// # Errors
    /// Returns [`RelayError::ConnectionError`] if the worker has stopped.
    pub fn post(&self, message: Value) -> Result<(), RelayError> {
        self.sender.post(message)
    }

    /// Post a typed request.
    ///
    /// # Errors
    /// Returns [`RelayError::ConnectionError`] if the worker has stopped.
    pub fn post_request(&self, request: &Request) -> Result<(), RelayError> {
        self.sender.post_request(request)
    }

    /// Wait for the next posted response.
    ///
    /// Returns `None` once the worker has shut down and every response was received.
    pub async fn recv(&mut self) -> Option<Response> {
        self.responses.recv().await
    }

    #[must_use]
    pub fn sender(&self) -> RelaySender {
        self.sender.clone()
    }

    #[must_use]
    pub fn worker_name(&self) -> &str {
        self.sender.worker.name()
    }

    /// Split into the inbound side and the outbound response stream.
    #[must_use]
    pub fn into_parts(self) -> (RelaySender, mpsc::UnboundedReceiver<Response>) {
        (self.sender, self.responses)
    }
}

/// Cloneable inbound side of a [`Relay`].
#[derive(Clone)]
pub struct RelaySender {
    worker: Arc<RelayWorker>,
}

impl RelaySender {
    /// Post an untyped message to the worker's inbound queue.
    ///
    /// # Errors
    /// Returns [`RelayError::ConnectionError`] if the worker has stopped.
    pub fn post(&self, message: Value) -> Result<(), RelayError> {
        self.worker.post(message)
    }

    /// Post a typed request.
    ///
    /// # Errors
    /// Returns [`RelayError::ConnectionError`] if the worker has stopped, or
    /// [`RelayError::ProtocolError`] if the request cannot be serialized.
    pub fn post_request(&self, request: &Request) -> Result<(), RelayError> {
        self.worker.post(serde_json::to_value(request)?)
    }
}
