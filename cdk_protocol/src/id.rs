//! Correlation ids

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Correlation token stamped on every outbound envelope.
///
/// Minted ids are short base-36 strings built from the random bits of a
/// UUIDv4. They have a very low collision probability over the lifetime of
/// one page and are not suitable as secrets. On the wire the id is a plain
/// string, so ids echoed back by a host deserialize whatever their shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Mints a fresh id from a random source
    pub fn mint() -> Self {
        let (_, low) = Uuid::new_v4().as_u64_pair();
        // The top two bits of the low half hold the RFC 4122 variant.
        Self(to_base36(low & (u64::MAX >> 2)))
    }

    /// Wraps an id received from a host
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the id, returning the inner string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self::from_string(id)
    }
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::with_capacity(13);
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    digits.into_iter().map(char::from).collect()
}
