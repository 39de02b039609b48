//! # CDK Protocol
//!
//! This crate defines the wire protocol spoken between an embedded app and
//! the Onion host shell.
//!
//! ## Philosophy
//!
//! - **One envelope**: every message, in either direction, is an
//!   [`EventEnvelope`] carrying an event kind, the sender instance, a
//!   correlation id and a payload
//! - **Typed, not stringly-typed**: the literal event strings live in exactly
//!   one place ([`EventKind`]) and payloads are plain serde structs
//! - **Forward compatible**: inbound data that does not decode is reported as
//!   a [`DecodeError`], never a panic, so callers can ignore it
//!
//! ## Architecture
//!
//! Outbound, a payload struct is wrapped with [`EventEnvelope::new`] and
//! serialized to a JSON value. Inbound, a raw JSON value is turned into an
//! [`InboundEvent`] with [`InboundEvent::decode`], which only accepts the
//! kinds a host is allowed to send.

pub mod content;
pub mod envelope;
pub mod error;
pub mod event;
pub mod id;

pub use content::{
    CommandRequest, CommandResult, EventContent, InitContent, PublishContent, ServiceRequest,
    ServiceResult, SubscribeContent, ToastContent, TopicMessage,
};
pub use envelope::{EventEnvelope, InboundEvent, InboundMessage};
pub use error::DecodeError;
pub use event::EventKind;
pub use id::EventId;
