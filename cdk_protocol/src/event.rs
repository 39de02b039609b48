//! Event kinds and their literal wire names

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of an envelope.
///
/// The serialized names are the protocol surface shared with existing hosts
/// and must stay byte-for-byte stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Host assigns the app its identity
    #[serde(rename = "Onion.CDK.Init")]
    Init,
    /// App subscribes to a topic
    #[serde(rename = "Onion.CDK.Subscribe")]
    Subscribe,
    /// App publishes to a topic
    #[serde(rename = "Onion.CDK.Publish")]
    Publish,
    /// Service invocation (outbound) or service result (inbound)
    #[serde(rename = "Onion.CDK.Service")]
    Service,
    /// Host command (outbound) or command response (inbound)
    #[serde(rename = "Onion.CDK.Command")]
    Command,
    /// App asks the host to show a toast
    #[serde(rename = "Onion.CDK.Toast")]
    Toast,
    /// Host pushes a message on a subscribed topic
    #[serde(rename = "Onion.CDK.Message")]
    Message,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [EventKind; 7] = [
        EventKind::Init,
        EventKind::Subscribe,
        EventKind::Publish,
        EventKind::Service,
        EventKind::Command,
        EventKind::Toast,
        EventKind::Message,
    ];

    /// Returns the literal wire name
    pub const fn as_str(&self) -> &'static str {
        match self {
            EventKind::Init => "Onion.CDK.Init",
            EventKind::Subscribe => "Onion.CDK.Subscribe",
            EventKind::Publish => "Onion.CDK.Publish",
            EventKind::Service => "Onion.CDK.Service",
            EventKind::Command => "Onion.CDK.Command",
            EventKind::Toast => "Onion.CDK.Toast",
            EventKind::Message => "Onion.CDK.Message",
        }
    }

    /// Looks up a kind by its wire name
    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Whether a host may send this kind to an app
    pub const fn is_inbound(&self) -> bool {
        matches!(
            self,
            EventKind::Init | EventKind::Service | EventKind::Command | EventKind::Message
        )
    }

    /// Whether an app may send this kind to a host
    pub const fn is_outbound(&self) -> bool {
        matches!(
            self,
            EventKind::Subscribe
                | EventKind::Publish
                | EventKind::Service
                | EventKind::Command
                | EventKind::Toast
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
