//! Envelope construction and posting

use crate::pending::PendingServices;
use crate::sender::encode;
use crate::{CdkError, CdkSender, ClientConfig, HostTransport, ServiceCallback};
use cdk_protocol::{EventEnvelope, EventId, EventKind, PublishContent, ServiceRequest};
use serde_json::Value;
use tracing::{debug, warn};

/// Outbound half of a client: stamps identity and correlation ids onto
/// payloads and posts them through the transport.
#[derive(Debug)]
pub(crate) struct Dispatcher<T: HostTransport> {
    pub(crate) transport: T,
    pub(crate) config: ClientConfig,
    pub(crate) app_uid: String,
    pub(crate) initialized: bool,
    pub(crate) disposed: bool,
    pub(crate) pending: PendingServices,
}

impl<T: HostTransport> Dispatcher<T> {
    pub(crate) fn new(transport: T, config: ClientConfig) -> Self {
        let pending = PendingServices::new(config.max_pending_services);
        Self {
            transport,
            config,
            app_uid: String::new(),
            initialized: false,
            disposed: false,
            pending,
        }
    }
}

impl<T: HostTransport> CdkSender for Dispatcher<T> {
    fn app_uid(&self) -> &str {
        &self.app_uid
    }

    fn send_event(&mut self, event: EventKind, content: Value) -> Result<EventId, CdkError> {
        if self.disposed {
            return Err(CdkError::Disposed);
        }

        let envelope = EventEnvelope::new(event, self.app_uid.clone(), content);
        let data = envelope.to_value()?;
        self.transport.post_message(&data, &self.config.target_origin)?;

        debug!(
            event = %event,
            event_id = %envelope.event_id,
            instance = %envelope.instance,
            "posted envelope"
        );
        Ok(envelope.event_id)
    }

    fn publish(&mut self, topic: &str, content: Value) -> Result<EventId, CdkError> {
        if !self.config.publish_enabled {
            return Err(CdkError::PublishDisabled {
                topic: topic.to_string(),
            });
        }
        let (event, content) = encode(&PublishContent::new(topic, content))?;
        self.send_event(event, content)
    }

    fn service_with(
        &mut self,
        name: &str,
        command: &str,
        callback: ServiceCallback,
    ) -> Result<EventId, CdkError> {
        let (event, content) = encode(&ServiceRequest::new(name, command))?;
        let event_id = self.send_event(event, content)?;

        if let Some(evicted) = self.pending.insert(event_id.clone(), name, command, callback) {
            warn!(
                event_id = %evicted,
                capacity = self.config.max_pending_services,
                "pending service table full, dropped callback"
            );
        }
        Ok(event_id)
    }

    fn cancel_service(&mut self, event_id: &EventId) -> bool {
        self.pending.cancel(event_id)
    }
}
