//! Client error types

use thiserror::Error;

/// Errors raised by a [`HostTransport`](crate::HostTransport)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Posting a message to the host failed
    #[error("Failed to post message: {0}")]
    PostFailed(String),

    /// Attaching or detaching the message listener failed
    #[error("Listener error: {0}")]
    ListenerFailed(String),
}

/// Errors returned by client operations
#[derive(Debug, Error)]
pub enum CdkError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Caller-supplied content could not be serialized
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Client has been disposed")]
    Disposed,

    /// Publish is off unless enabled in the client config
    #[error("Publish is disabled (topic: {topic})")]
    PublishDisabled { topic: String },

    #[error("Message listener is already attached")]
    AlreadyListening,
}
