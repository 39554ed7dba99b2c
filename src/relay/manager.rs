use std::sync::mpsc::{self, Sender};
use std::thread;

use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;

use crate::engine::EngineLoader;
use crate::error::RelayError;
use crate::protocol::Response;

use super::channel::Command;
use super::dispatcher::{RelayContext, run_relay_worker};

pub(super) struct RelayWorker {
    sender: Sender<Command>,
    name: String,
}

impl RelayWorker {
    pub(super) fn spawn(
        loader: Box<dyn EngineLoader>,
        name: String,
        outbound: UnboundedSender<Response>,
    ) -> Result<Self, RelayError> {
        let (sender, receiver) = mpsc::channel::<Command>();
        let thread_name = name.clone();
        thread::Builder::new()
            .name(thread_name.clone())
            .spawn(move || {
                let mut context = RelayContext::new(loader);
                tracing::debug!(worker = %thread_name, "relay worker started");
                run_relay_worker(&mut context, &receiver, &outbound);
                tracing::debug!(worker = %thread_name, "relay worker stopped");
            })
            .map_err(|err| {
                RelayError::ConnectionError(format!("failed to spawn relay worker thread: {err}"))
            })?;

        Ok(Self { sender, name })
    }

    pub(super) fn name(&self) -> &str {
        &self.name
    }

    pub(super) fn post(&self, message: Value) -> Result<(), RelayError> {
        self.sender
            .send(Command::Message(message))
            .map_err(|_| RelayError::ConnectionError("relay worker closed".into()))
    }
}

impl Drop for RelayWorker {
    fn drop(&mut self) {
        let _ = self.sender.send(Command::Shutdown);
    }
}
