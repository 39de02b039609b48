//! Typed payloads carried in the `content` field of an envelope.
//!
//! Outbound payloads implement [`EventContent`], which ties each struct to
//! the event kind it travels under. Inbound payloads are only ever produced
//! by [`InboundEvent::decode`](crate::InboundEvent::decode).

use crate::EventKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A payload that is sent under a fixed event kind.
pub trait EventContent: Serialize {
    /// Kind stamped on the envelope carrying this payload
    const KIND: EventKind;
}

/// `Onion.CDK.Subscribe` payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubscribeContent {
    pub topic: String,
}

impl SubscribeContent {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
        }
    }
}

impl EventContent for SubscribeContent {
    const KIND: EventKind = EventKind::Subscribe;
}

/// `Onion.CDK.Publish` payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublishContent {
    pub topic: String,
    pub content: Value,
}

impl PublishContent {
    pub fn new(topic: impl Into<String>, content: Value) -> Self {
        Self {
            topic: topic.into(),
            content,
        }
    }
}

impl EventContent for PublishContent {
    const KIND: EventKind = EventKind::Publish;
}

/// Outbound `Onion.CDK.Service` payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceRequest {
    /// Service name
    pub service: String,
    pub command: String,
}

impl ServiceRequest {
    pub fn new(service: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            command: command.into(),
        }
    }
}

impl EventContent for ServiceRequest {
    const KIND: EventKind = EventKind::Service;
}

/// Outbound `Onion.CDK.Command` payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandRequest {
    pub cmd: String,
    pub params: Value,
}

impl CommandRequest {
    pub fn new(cmd: impl Into<String>, params: Value) -> Self {
        Self {
            cmd: cmd.into(),
            params,
        }
    }
}

impl EventContent for CommandRequest {
    const KIND: EventKind = EventKind::Command;
}

/// `Onion.CDK.Toast` payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToastContent {
    pub message: String,
}

impl ToastContent {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl EventContent for ToastContent {
    const KIND: EventKind = EventKind::Toast;
}

/// Inbound `Onion.CDK.Init` payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InitContent {
    #[serde(rename = "appUid")]
    pub app_uid: String,
}

/// Inbound `Onion.CDK.Service` payload: the result of a service call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceResult {
    /// Service name
    pub name: String,
    pub command: String,
    #[serde(default)]
    pub result: Value,
}

/// Inbound `Onion.CDK.Command` payload: the response to a host command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandResult {
    pub cmd: String,
    #[serde(default)]
    pub resp: Value,
}

/// Inbound `Onion.CDK.Message` payload: a message pushed on a topic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopicMessage {
    pub topic: String,
    #[serde(default)]
    pub content: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_service_request_field_names() {
        let value = serde_json::to_value(ServiceRequest::new("fs", "list")).unwrap();
        assert_eq!(value, json!({"service": "fs", "command": "list"}));
    }

    #[test]
    fn test_command_request_keeps_params_verbatim() {
        let params = json!({"path": "/tmp", "recursive": true});
        let value = serde_json::to_value(CommandRequest::new("ls", params.clone())).unwrap();
        assert_eq!(value, json!({"cmd": "ls", "params": params}));
    }

    #[test]
    fn test_init_content_uses_camel_case() {
        let init: InitContent = serde_json::from_value(json!({"appUid": "abc123"})).unwrap();
        assert_eq!(init.app_uid, "abc123");
        assert!(serde_json::from_value::<InitContent>(json!({"app_uid": "abc123"})).is_err());
    }

    #[test]
    fn test_any_typed_fields_default_to_null() {
        let result: ServiceResult =
            serde_json::from_value(json!({"name": "fs", "command": "list"})).unwrap();
        assert_eq!(result.result, Value::Null);

        let message: TopicMessage = serde_json::from_value(json!({"topic": "clock"})).unwrap();
        assert_eq!(message.content, Value::Null);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(SubscribeContent::KIND, EventKind::Subscribe);
        assert_eq!(PublishContent::KIND, EventKind::Publish);
        assert_eq!(ServiceRequest::KIND, EventKind::Service);
        assert_eq!(CommandRequest::KIND, EventKind::Command);
        assert_eq!(ToastContent::KIND, EventKind::Toast);
    }
}
