use serde_json::Value;

pub(super) enum Command {
    /// An inbound message, validated by the worker before dispatch.
    Message(Value),
    Shutdown,
}
