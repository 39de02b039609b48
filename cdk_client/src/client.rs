//! Client lifecycle and inbound demultiplexing

use crate::dispatcher::Dispatcher;
use crate::{
    CdkError, CdkHooks, CdkSender, ClientConfig, HookId, HookRegistry, HostTransport,
    ServiceCallback,
};
use cdk_protocol::{DecodeError, EventId, EventKind, InboundEvent};
use serde_json::Value;
use tracing::{debug, info, trace, warn};

/// Lifecycle state of a client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    /// No message listener attached yet
    Detached,
    /// Listening, waiting for the host's Init
    Uninitialized,
    /// Init received, app uid assigned
    Initialized,
    /// Disposed; terminal
    Disposed,
}

/// What [`CdkClient::process_message`] did with a message
#[derive(Debug)]
pub enum Dispatch {
    /// Delivered to the hooks under this kind
    Delivered(EventKind),
    /// Dropped without running any hook
    Ignored(IgnoreReason),
}

impl Dispatch {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Dispatch::Delivered(_))
    }
}

/// Why a message was dropped
#[derive(Debug)]
pub enum IgnoreReason {
    /// The listener was not attached
    NotListening,
    /// The data was not an event a host may send
    Undecodable(DecodeError),
}

/// An embedded app's connection to its host shell.
///
/// Owns the app uid, the transport and the registered hooks. Independent
/// clients share nothing.
#[derive(Debug)]
pub struct CdkClient<T: HostTransport> {
    dispatcher: Dispatcher<T>,
    hooks: HookRegistry,
    listening: bool,
}

impl<T: HostTransport> CdkClient<T> {
    /// Creates a client with the default configuration
    pub fn new(transport: T, hooks: impl CdkHooks + 'static) -> Self {
        Self::with_config(transport, hooks, ClientConfig::default())
    }

    pub fn with_config(transport: T, hooks: impl CdkHooks + 'static, config: ClientConfig) -> Self {
        let mut registry = HookRegistry::new();
        registry.add(Box::new(hooks));
        Self {
            dispatcher: Dispatcher::new(transport, config),
            hooks: registry,
            listening: false,
        }
    }

    /// Attaches the message listener. Call once, before the host sends Init.
    pub fn init(&mut self) -> Result<(), CdkError> {
        if self.dispatcher.disposed {
            return Err(CdkError::Disposed);
        }
        if self.listening {
            return Err(CdkError::AlreadyListening);
        }

        self.dispatcher.transport.attach_listener()?;
        self.listening = true;
        trace!("attached message listener");
        Ok(())
    }

    /// Detaches the listener and drops pending service callbacks.
    ///
    /// Afterwards inbound messages are ignored and outbound operations fail
    /// with [`CdkError::Disposed`]. Disposing twice is a no-op.
    pub fn dispose(&mut self) -> Result<(), CdkError> {
        if self.dispatcher.disposed {
            return Ok(());
        }

        self.dispatcher.disposed = true;
        self.dispatcher.pending.clear();
        if self.listening {
            self.listening = false;
            self.dispatcher.transport.detach_listener()?;
            trace!("detached message listener");
        }
        Ok(())
    }

    pub fn state(&self) -> ClientState {
        if self.dispatcher.disposed {
            ClientState::Disposed
        } else if !self.listening {
            ClientState::Detached
        } else if self.dispatcher.initialized {
            ClientState::Initialized
        } else {
            ClientState::Uninitialized
        }
    }

    /// Whether the host's Init has been processed
    pub fn is_initialized(&self) -> bool {
        self.dispatcher.initialized
    }

    pub fn config(&self) -> &ClientConfig {
        &self.dispatcher.config
    }

    /// Registers another hook set, run after those already registered
    pub fn add_hooks(&mut self, hooks: impl CdkHooks + 'static) -> HookId {
        self.hooks.add(Box::new(hooks))
    }

    pub fn remove_hooks(&mut self, id: HookId) -> bool {
        self.hooks.remove(id)
    }

    /// Number of service callbacks still waiting for a result
    pub fn pending_services(&self) -> usize {
        self.dispatcher.pending.len()
    }

    pub fn transport(&self) -> &T {
        &self.dispatcher.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.dispatcher.transport
    }

    /// Handles the data of one message received from the host.
    ///
    /// Init updates the app uid before the hooks run. A Service result first
    /// resolves its pending callback, then reaches the hooks. Anything that
    /// is not a well-formed inbound event is ignored.
    pub fn process_message(&mut self, data: &Value) -> Dispatch {
        if !self.listening {
            debug!("no message listener attached, dropped message");
            return Dispatch::Ignored(IgnoreReason::NotListening);
        }

        let message = match InboundEvent::decode(data) {
            Ok(message) => message,
            Err(err) => {
                debug!(reason = %err, "ignored inbound message");
                return Dispatch::Ignored(IgnoreReason::Undecodable(err));
            }
        };

        match &message.event {
            InboundEvent::Init(init) => {
                if self.dispatcher.initialized {
                    warn!(
                        previous = %self.dispatcher.app_uid,
                        app_uid = %init.app_uid,
                        "host re-initialized client"
                    );
                } else {
                    info!(app_uid = %init.app_uid, "client initialized");
                }
                self.dispatcher.app_uid = init.app_uid.clone();
                self.dispatcher.initialized = true;
            }
            InboundEvent::Service(result) => {
                let callback = self
                    .dispatcher
                    .pending
                    .resolve(message.event_id.as_ref(), result);
                if let Some(callback) = callback {
                    callback(result);
                }
            }
            InboundEvent::Command(_) | InboundEvent::Message(_) => {}
        }

        self.hooks.dispatch(&mut self.dispatcher, &message.event);
        Dispatch::Delivered(message.event.kind())
    }
}

impl<T: HostTransport> CdkSender for CdkClient<T> {
    fn app_uid(&self) -> &str {
        self.dispatcher.app_uid()
    }

    fn send_event(&mut self, event: EventKind, content: Value) -> Result<EventId, CdkError> {
        self.dispatcher.send_event(event, content)
    }

    fn publish(&mut self, topic: &str, content: Value) -> Result<EventId, CdkError> {
        self.dispatcher.publish(topic, content)
    }

    fn service_with(
        &mut self,
        name: &str,
        command: &str,
        callback: ServiceCallback,
    ) -> Result<EventId, CdkError> {
        self.dispatcher.service_with(name, command, callback)
    }

    fn cancel_service(&mut self, event_id: &EventId) -> bool {
        self.dispatcher.cancel_service(event_id)
    }
}

impl<T: HostTransport> Drop for CdkClient<T> {
    fn drop(&mut self) {
        if self.listening {
            if let Err(err) = self.dispatcher.transport.detach_listener() {
                warn!(error = %err, "failed to detach message listener");
            }
        }
    }
}
