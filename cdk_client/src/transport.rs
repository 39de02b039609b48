//! Transport abstraction for the cross-document channel

use crate::TransportError;
use cdk_protocol::EventEnvelope;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// The channel between an embedded app and its host frame.
///
/// A browser binding posts to the parent window and registers a `message`
/// listener that forwards each event's data to
/// [`CdkClient::process_message`](crate::CdkClient::process_message).
/// Tests use [`RecordingTransport`].
pub trait HostTransport {
    /// Posts one message to the host frame
    fn post_message(&mut self, data: &Value, target_origin: &str) -> Result<(), TransportError>;

    /// Starts delivering host messages to the client
    fn attach_listener(&mut self) -> Result<(), TransportError> {
        Ok(())
    }

    /// Stops delivering host messages to the client
    fn detach_listener(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}

/// A message handed to [`HostTransport::post_message`]
#[derive(Debug, Clone, PartialEq)]
pub struct PostedMessage {
    pub data: Value,
    pub target_origin: String,
}

/// Everything a [`RecordingTransport`] has seen
#[derive(Debug, Default)]
pub struct TransportLog {
    pub posted: Vec<PostedMessage>,
    pub attached: usize,
    pub detached: usize,
    /// When set, posts fail with this reason and are not recorded
    pub fail_posts: Option<String>,
}

/// In-memory transport that records traffic.
///
/// Clones share one log, so a test can keep a handle after moving the
/// transport into a client.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    log: Rc<RefCell<TransportLog>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every posted message, oldest first
    pub fn posted(&self) -> Vec<PostedMessage> {
        self.log.borrow().posted.clone()
    }

    /// Returns posted messages that parse as envelopes
    pub fn envelopes(&self) -> Vec<EventEnvelope> {
        self.log
            .borrow()
            .posted
            .iter()
            .filter_map(|message| serde_json::from_value(message.data.clone()).ok())
            .collect()
    }

    /// Returns and forgets the posted messages
    pub fn take_posted(&self) -> Vec<PostedMessage> {
        std::mem::take(&mut self.log.borrow_mut().posted)
    }

    pub fn attach_count(&self) -> usize {
        self.log.borrow().attached
    }

    pub fn detach_count(&self) -> usize {
        self.log.borrow().detached
    }

    /// Whether a listener is currently attached
    pub fn is_listening(&self) -> bool {
        let log = self.log.borrow();
        log.attached > log.detached
    }

    /// Makes subsequent posts fail, or succeed again with `None`
    pub fn fail_posts(&self, reason: Option<&str>) {
        self.log.borrow_mut().fail_posts = reason.map(str::to_string);
    }
}

impl HostTransport for RecordingTransport {
    fn post_message(&mut self, data: &Value, target_origin: &str) -> Result<(), TransportError> {
        let mut log = self.log.borrow_mut();
        if let Some(reason) = &log.fail_posts {
            return Err(TransportError::PostFailed(reason.clone()));
        }
        log.posted.push(PostedMessage {
            data: data.clone(),
            target_origin: target_origin.to_string(),
        });
        Ok(())
    }

    fn attach_listener(&mut self) -> Result<(), TransportError> {
        self.log.borrow_mut().attached += 1;
        Ok(())
    }

    fn detach_listener(&mut self) -> Result<(), TransportError> {
        self.log.borrow_mut().detached += 1;
        Ok(())
    }
}
