//! Envelope structure and inbound decoding

use crate::content::EventContent;
use crate::{
    CommandResult, DecodeError, EventId, EventKind, InitContent, ServiceResult, TopicMessage,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

static NULL: Value = Value::Null;

/// The wire unit exchanged with the host.
///
/// Serializes to `{event, instance, eventId, content}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Kind of event; decides the shape of `content`
    pub event: EventKind,
    /// App uid of the sender, empty before Init
    pub instance: String,
    /// Correlation id minted for this envelope
    #[serde(rename = "eventId")]
    pub event_id: EventId,
    /// Event-specific payload
    pub content: Value,
}

impl EventEnvelope {
    /// Creates an envelope with a freshly minted event id
    pub fn new(event: EventKind, instance: impl Into<String>, content: Value) -> Self {
        Self {
            event,
            instance: instance.into(),
            event_id: EventId::mint(),
            content,
        }
    }

    /// Creates an envelope for a typed payload
    pub fn for_content<C: EventContent>(
        instance: impl Into<String>,
        content: &C,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(C::KIND, instance, serde_json::to_value(content)?))
    }

    /// Serializes the envelope into the value posted to the host
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// An event a host is allowed to send, with its decoded payload.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    Init(InitContent),
    Service(ServiceResult),
    Command(CommandResult),
    Message(TopicMessage),
}

impl InboundEvent {
    /// Returns the kind this event arrived under
    pub fn kind(&self) -> EventKind {
        match self {
            InboundEvent::Init(_) => EventKind::Init,
            InboundEvent::Service(_) => EventKind::Service,
            InboundEvent::Command(_) => EventKind::Command,
            InboundEvent::Message(_) => EventKind::Message,
        }
    }

    /// Decodes raw message data received from the host.
    ///
    /// Only `content` is interpreted, and only according to `event`.
    /// An Init without `content.appUid` falls back to a top-level `appUid`
    /// field, which some hosts send instead.
    pub fn decode(data: &Value) -> Result<InboundMessage, DecodeError> {
        let object = data.as_object().ok_or(DecodeError::NotAnObject)?;

        let name = object
            .get("event")
            .and_then(Value::as_str)
            .ok_or(DecodeError::MissingEvent)?;
        let kind =
            EventKind::from_wire(name).ok_or_else(|| DecodeError::UnknownEvent(name.to_string()))?;
        if !kind.is_inbound() {
            return Err(DecodeError::OutboundOnly(kind));
        }

        let content = object.get("content").unwrap_or(&NULL);
        let malformed = |source| DecodeError::MalformedContent {
            event: kind,
            source,
        };

        let event = match kind {
            EventKind::Init => match InitContent::deserialize(content) {
                Ok(init) => InboundEvent::Init(init),
                Err(err) => match object.get("appUid").and_then(Value::as_str) {
                    Some(app_uid) => InboundEvent::Init(InitContent {
                        app_uid: app_uid.to_string(),
                    }),
                    None => return Err(malformed(err)),
                },
            },
            EventKind::Service => {
                InboundEvent::Service(ServiceResult::deserialize(content).map_err(malformed)?)
            }
            EventKind::Command => {
                InboundEvent::Command(CommandResult::deserialize(content).map_err(malformed)?)
            }
            EventKind::Message => {
                InboundEvent::Message(TopicMessage::deserialize(content).map_err(malformed)?)
            }
            other => return Err(DecodeError::OutboundOnly(other)),
        };

        Ok(InboundMessage {
            event_id: object
                .get("eventId")
                .and_then(Value::as_str)
                .map(EventId::from_string),
            instance: object
                .get("instance")
                .and_then(Value::as_str)
                .map(str::to_string),
            event,
        })
    }
}

/// A decoded inbound message together with its envelope header fields.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    /// Correlation id, if the host sent one
    pub event_id: Option<EventId>,
    /// Instance field, if the host sent one
    pub instance: Option<String>,
    pub event: InboundEvent,
}
