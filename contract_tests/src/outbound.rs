//! Outbound contract tests
//!
//! These pin every envelope an app can post to its host.

// ===== Event Identifiers =====
pub const EVENT_SUBSCRIBE: &str = "Onion.CDK.Subscribe";
pub const EVENT_PUBLISH: &str = "Onion.CDK.Publish";
pub const EVENT_SERVICE: &str = "Onion.CDK.Service";
pub const EVENT_COMMAND: &str = "Onion.CDK.Command";
pub const EVENT_TOAST: &str = "Onion.CDK.Toast";
