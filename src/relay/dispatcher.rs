use std::sync::mpsc::Receiver;

use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;

use crate::engine::{Engine, EngineLoader};
use crate::error::RelayError;
use crate::protocol::{Operation, Request, Response};

use super::channel::Command;

/// Worker-side state: the engine loader and, once `init` succeeded, the database handle.
pub struct RelayContext {
    loader: Box<dyn EngineLoader>,
    engine: Option<Box<dyn Engine>>,
}

impl RelayContext {
    #[must_use]
    pub fn new(loader: Box<dyn EngineLoader>) -> Self {
        Self {
            loader,
            engine: None,
        }
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.engine.is_some()
    }

    /// Validate an untyped message and handle it. Always yields exactly one response.
    pub fn handle_message(&mut self, message: Value) -> Response {
        match Request::decode(message) {
            Ok(request) => self.handle(request),
            Err(rejected) => {
                tracing::warn!(id = %rejected.id, error = %rejected.error, "rejected inbound message");
                Response::error(rejected.id, &rejected.error)
            }
        }
    }

    /// Dispatch a validated request to the engine.
    pub fn handle(&mut self, request: Request) -> Response {
        let Request { id, operation } = request;
        tracing::debug!(id = %id, method = operation.method(), "handling request");
        let outcome = match operation {
            Operation::Init => self.init().map(|()| None),
            Operation::Execute { sql } => self
                .engine_mut()
                .and_then(|db| db.run(&sql))
                .map(|()| None),
            Operation::Query { sql } => self
                .engine_mut()
                .and_then(|db| db.exec(&sql))
                .map(Some),
        };
        match outcome {
            Ok(None) => Response::ack(id),
            Ok(Some(rows)) => Response::rows(id, rows),
            Err(err) => {
                tracing::debug!(id = %id, error = %err, "request failed");
                Response::error(id, &err)
            }
        }
    }

    fn init(&mut self) -> Result<(), RelayError> {
        if self.engine.is_some() {
            tracing::debug!("init received with a database already loaded; keeping it");
            return Ok(());
        }
        match self.loader.load() {
            Ok(engine) => {
                self.engine = Some(engine);
                tracing::info!("embedded database initialized");
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "embedded database failed to initialize");
                Err(err)
            }
        }
    }

    fn engine_mut(&mut self) -> Result<&mut Box<dyn Engine>, RelayError> {
        self.engine.as_mut().ok_or(RelayError::NotInitialized)
    }
}

pub(super) fn run_relay_worker(
    context: &mut RelayContext,
    receiver: &Receiver<Command>,
    outbound: &UnboundedSender<Response>,
) {
    while let Ok(command) = receiver.recv() {
        match command {
            Command::Shutdown => break,
            Command::Message(message) => {
                let response = context.handle_message(message);
                if outbound.send(response).is_err() {
                    tracing::debug!("response receiver dropped; discarding response");
                }
            }
        }
    }
}
