//! Outbound operations

use crate::CdkError;
use cdk_protocol::{
    CommandRequest, EventContent, EventId, EventKind, ServiceRequest, ServiceResult,
    SubscribeContent, ToastContent,
};
use serde_json::Value;

/// Callback run once when the result of a service call arrives
pub type ServiceCallback = Box<dyn FnOnce(&ServiceResult)>;

/// Sends envelopes to the host.
///
/// Implemented by [`CdkClient`](crate::CdkClient) and handed to every hook,
/// so hooks can send from inside a callback. Every operation posts exactly
/// one envelope and returns its freshly minted event id.
pub trait CdkSender {
    /// App uid assigned by the host, empty before Init
    fn app_uid(&self) -> &str;

    /// Posts `{event, instance, eventId, content}` to the host.
    ///
    /// `content` is sent as is, without checking it against `event`.
    fn send_event(&mut self, event: EventKind, content: Value) -> Result<EventId, CdkError>;

    /// Publishes `content` on `topic`.
    ///
    /// Fails with [`CdkError::PublishDisabled`] unless publish is enabled in
    /// the client config.
    fn publish(&mut self, topic: &str, content: Value) -> Result<EventId, CdkError>;

    /// Invokes a host service and runs `callback` with its result.
    ///
    /// The result is matched by event id when the host echoes it, otherwise
    /// by the oldest outstanding call with the same service and command.
    fn service_with(
        &mut self,
        name: &str,
        command: &str,
        callback: ServiceCallback,
    ) -> Result<EventId, CdkError>;

    /// Forgets the callback registered for `event_id`
    fn cancel_service(&mut self, event_id: &EventId) -> bool;

    fn subscribe(&mut self, topic: &str) -> Result<EventId, CdkError> {
        let (event, content) = encode(&SubscribeContent::new(topic))?;
        self.send_event(event, content)
    }

    /// Invokes a host service without waiting for its result
    fn service(&mut self, name: &str, command: &str) -> Result<EventId, CdkError> {
        let (event, content) = encode(&ServiceRequest::new(name, command))?;
        self.send_event(event, content)
    }

    fn send_cmd(&mut self, command: &str, params: Value) -> Result<EventId, CdkError> {
        let (event, content) = encode(&CommandRequest::new(command, params))?;
        self.send_event(event, content)
    }

    fn send_toast(&mut self, message: &str) -> Result<EventId, CdkError> {
        let (event, content) = encode(&ToastContent::new(message))?;
        self.send_event(event, content)
    }
}

pub(crate) fn encode<C: EventContent>(content: &C) -> Result<(EventKind, Value), CdkError> {
    Ok((C::KIND, serde_json::to_value(content)?))
}
