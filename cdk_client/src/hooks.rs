//! Hooks the host's events are delivered to.
//!
//! A hook set implements [`CdkHooks`] and overrides only the events it cares
//! about. The client keeps any number of hook sets in a [`HookRegistry`] and
//! calls them in registration order.

use crate::CdkSender;
use cdk_protocol::InboundEvent;
use serde_json::Value;
use std::fmt;

/// Reactions to host events. Every method defaults to a no-op.
///
/// Hooks run synchronously while a message is processed. Panics are not
/// caught.
pub trait CdkHooks {
    /// The host assigned this app its uid, readable through `cdk.app_uid()`
    fn on_init(&mut self, _cdk: &mut dyn CdkSender) {}

    /// A service call finished
    fn on_service(
        &mut self,
        _cdk: &mut dyn CdkSender,
        _name: &str,
        _command: &str,
        _result: &Value,
    ) {
    }

    /// A message arrived on a subscribed topic
    fn on_message(&mut self, _cdk: &mut dyn CdkSender, _topic: &str, _content: &Value) {}

    /// A host command responded
    fn on_cmd(&mut self, _cdk: &mut dyn CdkSender, _cmd: &str, _resp: &Value) {}
}

/// Hook set that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl CdkHooks for NoopHooks {}

type InitFn = Box<dyn FnMut(&mut dyn CdkSender)>;
type ServiceFn = Box<dyn FnMut(&mut dyn CdkSender, &str, &str, &Value)>;
type PayloadFn = Box<dyn FnMut(&mut dyn CdkSender, &str, &Value)>;

/// Hook set assembled from closures.
///
/// ```
/// use cdk_client::{CallbackHooks, CdkClient, CdkSender, RecordingTransport};
///
/// let hooks = CallbackHooks::new().on_init(|cdk| {
///     cdk.subscribe("clock").ok();
/// });
/// let mut client = CdkClient::new(RecordingTransport::new(), hooks);
/// client.init().unwrap();
/// ```
#[derive(Default)]
pub struct CallbackHooks {
    init: Option<InitFn>,
    service: Option<ServiceFn>,
    message: Option<PayloadFn>,
    cmd: Option<PayloadFn>,
}

impl CallbackHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_init(mut self, f: impl FnMut(&mut dyn CdkSender) + 'static) -> Self {
        self.init = Some(Box::new(f));
        self
    }

    pub fn on_service(
        mut self,
        f: impl FnMut(&mut dyn CdkSender, &str, &str, &Value) + 'static,
    ) -> Self {
        self.service = Some(Box::new(f));
        self
    }

    pub fn on_message(mut self, f: impl FnMut(&mut dyn CdkSender, &str, &Value) + 'static) -> Self {
        self.message = Some(Box::new(f));
        self
    }

    pub fn on_cmd(mut self, f: impl FnMut(&mut dyn CdkSender, &str, &Value) + 'static) -> Self {
        self.cmd = Some(Box::new(f));
        self
    }
}

impl CdkHooks for CallbackHooks {
    fn on_init(&mut self, cdk: &mut dyn CdkSender) {
        if let Some(f) = &mut self.init {
            f(cdk);
        }
    }

    fn on_service(&mut self, cdk: &mut dyn CdkSender, name: &str, command: &str, result: &Value) {
        if let Some(f) = &mut self.service {
            f(cdk, name, command, result);
        }
    }

    fn on_message(&mut self, cdk: &mut dyn CdkSender, topic: &str, content: &Value) {
        if let Some(f) = &mut self.message {
            f(cdk, topic, content);
        }
    }

    fn on_cmd(&mut self, cdk: &mut dyn CdkSender, cmd: &str, resp: &Value) {
        if let Some(f) = &mut self.cmd {
            f(cdk, cmd, resp);
        }
    }
}

impl fmt::Debug for CallbackHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackHooks")
            .field("init", &self.init.is_some())
            .field("service", &self.service.is_some())
            .field("message", &self.message.is_some())
            .field("cmd", &self.cmd.is_some())
            .finish()
    }
}

/// Handle for removing a registered hook set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(u64);

/// Ordered collection of hook sets
#[derive(Default)]
pub struct HookRegistry {
    entries: Vec<(HookId, Box<dyn CdkHooks>)>,
    next_id: u64,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a hook set; it runs after every set added before it
    pub fn add(&mut self, hooks: Box<dyn CdkHooks>) -> HookId {
        let id = HookId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, hooks));
        id
    }

    pub fn remove(&mut self, id: HookId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Delivers one inbound event to every hook set
    pub fn dispatch(&mut self, cdk: &mut dyn CdkSender, event: &InboundEvent) {
        for (_, hooks) in &mut self.entries {
            match event {
                InboundEvent::Init(_) => hooks.on_init(cdk),
                InboundEvent::Service(result) => {
                    hooks.on_service(cdk, &result.name, &result.command, &result.result)
                }
                InboundEvent::Message(message) => {
                    hooks.on_message(cdk, &message.topic, &message.content)
                }
                InboundEvent::Command(response) => hooks.on_cmd(cdk, &response.cmd, &response.resp),
            }
        }
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("len", &self.entries.len())
            .finish()
    }
}
