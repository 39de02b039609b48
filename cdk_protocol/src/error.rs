//! Decode errors

use crate::EventKind;
use thiserror::Error;

/// Reasons an inbound value is not a deliverable event.
///
/// None of these are fatal: the client drops the message and logs the
/// reason.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Message data is not a JSON object
    #[error("message data is not an object")]
    NotAnObject,

    /// No string `event` field
    #[error("message has no event field")]
    MissingEvent,

    /// `event` names no known kind
    #[error("unknown event type: {0}")]
    UnknownEvent(String),

    /// A kind only apps send arrived from the host
    #[error("{0} is not an inbound event")]
    OutboundOnly(EventKind),

    /// `content` does not match the shape required by `event`
    #[error("malformed {event} content: {source}")]
    MalformedContent {
        event: EventKind,
        #[source]
        source: serde_json::Error,
    },
}
