//! Client configuration

use serde::{Deserialize, Serialize};

/// Target origin used when posting to the host unless configured otherwise
pub const DEFAULT_TARGET_ORIGIN: &str = "*";

/// Maximum number of service callbacks awaiting a result
pub const DEFAULT_MAX_PENDING_SERVICES: usize = 256;

/// Client configuration.
///
/// Every field has a default, so a partial document deserializes:
///
/// ```
/// use cdk_client::ClientConfig;
///
/// let config: ClientConfig = serde_json::from_str(r#"{"publish_enabled": true}"#).unwrap();
/// assert_eq!(config.target_origin, "*");
/// assert!(config.publish_enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Target origin passed with every posted message
    pub target_origin: String,
    /// Whether `publish` sends `Onion.CDK.Publish` envelopes
    pub publish_enabled: bool,
    /// Capacity of the pending service table; the oldest entry is evicted
    /// when it is full
    pub max_pending_services: usize,
}

impl ClientConfig {
    /// Sets the target origin
    pub fn with_target_origin(mut self, origin: impl Into<String>) -> Self {
        self.target_origin = origin.into();
        self
    }

    /// Enables or disables publish
    pub fn with_publish(mut self, enabled: bool) -> Self {
        self.publish_enabled = enabled;
        self
    }

    /// Sets the pending service capacity
    pub fn with_max_pending_services(mut self, max: usize) -> Self {
        self.max_pending_services = max;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            target_origin: DEFAULT_TARGET_ORIGIN.to_string(),
            publish_enabled: false,
            max_pending_services: DEFAULT_MAX_PENDING_SERVICES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.target_origin, "*");
        assert!(!config.publish_enabled);
        assert_eq!(config.max_pending_services, DEFAULT_MAX_PENDING_SERVICES);
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::default()
            .with_target_origin("https://onion.local")
            .with_publish(true)
            .with_max_pending_services(4);

        assert_eq!(config.target_origin, "https://onion.local");
        assert!(config.publish_enabled);
        assert_eq!(config.max_pending_services, 4);
    }

    #[test]
    fn test_deserialize_empty_document() {
        let config: ClientConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
    }
}
