//! Inbound contract tests
//!
//! These pin the host messages an app must understand.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ===== Event Identifiers =====
pub const EVENT_INIT: &str = "Onion.CDK.Init";
pub const EVENT_SERVICE: &str = "Onion.CDK.Service";
pub const EVENT_COMMAND: &str = "Onion.CDK.Command";
pub const EVENT_MESSAGE: &str = "Onion.CDK.Message";

// ===== Canonical Host Message =====

/// A message as a host builds it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostMessage {
    pub event: String,
    pub instance: String,
    #[serde(rename = "eventId")]
    pub event_id: String,
    pub content: Value,
}

impl HostMessage {
    pub fn new(event: &str, content: Value) -> Self {
        Self {
            event: event.to_string(),
            instance: "host".to_string(),
            event_id: "h0st1d".to_string(),
            content,
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).expect("Failed to serialize host message")
    }
}
