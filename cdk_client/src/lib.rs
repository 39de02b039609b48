//! # CDK Client
//!
//! The SDK an app embedded in the Onion host shell uses to talk to its host.
//!
//! ## Philosophy
//!
//! - **Instances, not globals**: every [`CdkClient`] owns its app uid,
//!   transport and hooks
//! - **Fire and forget**: outbound operations post one envelope and return
//!   its event id without waiting for a reply
//! - **Lenient inbound**: messages the client does not understand are
//!   dropped, never surfaced as errors
//!
//! ## Example
//!
//! ```
//! use cdk_client::{CallbackHooks, CdkClient, CdkSender, RecordingTransport};
//! use serde_json::json;
//!
//! let transport = RecordingTransport::new();
//! let hooks = CallbackHooks::new()
//!     .on_init(|cdk| {
//!         cdk.subscribe("clock").ok();
//!     })
//!     .on_message(|_cdk, topic, content| println!("{topic}: {content}"));
//!
//! let mut client = CdkClient::new(transport.clone(), hooks);
//! client.init().unwrap();
//!
//! // The browser binding forwards each `message` event's data:
//! client.process_message(&json!({
//!     "event": "Onion.CDK.Init",
//!     "content": {"appUid": "abc123"}
//! }));
//!
//! assert_eq!(client.app_uid(), "abc123");
//! assert_eq!(transport.envelopes()[0].content, json!({"topic": "clock"}));
//! ```

pub mod client;
pub mod config;
mod dispatcher;
pub mod error;
pub mod hooks;
mod pending;
pub mod sender;
pub mod transport;

pub use client::{CdkClient, ClientState, Dispatch, IgnoreReason};
pub use config::{ClientConfig, DEFAULT_MAX_PENDING_SERVICES, DEFAULT_TARGET_ORIGIN};
pub use error::{CdkError, TransportError};
pub use hooks::{CallbackHooks, CdkHooks, HookId, HookRegistry, NoopHooks};
pub use sender::{CdkSender, ServiceCallback};
pub use transport::{HostTransport, PostedMessage, RecordingTransport, TransportLog};

pub use cdk_protocol::{EventEnvelope, EventId, EventKind, ServiceResult};
