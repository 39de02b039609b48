//! # Wire Contract Tests
//!
//! "Golden" tests for the envelope format shared with Onion hosts, so the
//! protocol does not drift accidentally over time.
//!
//! ## Philosophy
//!
//! - **Literal over derived**: expected values are written out as JSON, not
//!   produced by the code under test
//! - **Both directions**: outbound envelopes are checked field by field,
//!   inbound host messages are checked to decode
//!
//! ## Structure
//!
//! - [`outbound`]: envelopes an app posts to the host
//! - [`inbound`]: messages a host posts to the app

pub mod inbound;
pub mod outbound;

/// Common test helpers for contract validation
pub mod test_helpers {
    use cdk_client::{CdkClient, NoopHooks, RecordingTransport};
    use serde_json::Value;

    /// Envelope keys, in no particular order
    pub const ENVELOPE_KEYS: [&str; 4] = ["event", "instance", "eventId", "content"];

    /// Creates a listening client together with a handle on its transport
    pub fn recording_client() -> (CdkClient<RecordingTransport>, RecordingTransport) {
        let transport = RecordingTransport::new();
        let mut client = CdkClient::new(transport.clone(), NoopHooks);
        client.init().expect("Failed to attach listener");
        (client, transport)
    }

    /// Returns the only message posted so far
    pub fn single_posted(transport: &RecordingTransport) -> Value {
        let posted = transport.posted();
        assert_eq!(
            posted.len(),
            1,
            "Expected exactly one posted message, got {}",
            posted.len()
        );
        posted[0].data.clone()
    }

    /// Verifies an envelope has exactly the expected keys, event and content
    pub fn verify_envelope_contract(
        envelope: &Value,
        expected_event: &str,
        expected_content: &Value,
    ) {
        let object = envelope.as_object().expect("Envelope is not an object");
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        let mut expected_keys = ENVELOPE_KEYS.to_vec();
        expected_keys.sort_unstable();
        assert_eq!(keys, expected_keys, "Envelope keys changed");

        assert_eq!(
            envelope["event"], expected_event,
            "Event identifier changed: expected '{}', got '{}'",
            expected_event, envelope["event"]
        );
        assert_eq!(
            &envelope["content"], expected_content,
            "Content contract changed for {}",
            expected_event
        );
        assert!(envelope["instance"].is_string(), "instance must be a string");
        assert!(envelope["eventId"].is_string(), "eventId must be a string");
    }
}
