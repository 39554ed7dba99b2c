//! Wire messages exchanged between the controlling context and the relay worker.
//!
//! Inbound messages are untyped JSON values until [`Request::decode`] validates
//! them; outbound messages are always well-formed [`Response`] values.

mod request;
mod response;

pub use request::{Operation, Rejected, Request};
pub use response::{Outcome, Payload, Response};

/// Opaque correlation token, echoed back verbatim.
pub type CorrelationId = serde_json::Value;
