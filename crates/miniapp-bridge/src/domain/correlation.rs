//! Request identifiers correlating responses to their originating requests.
//!
//! Combines a process-wide monotonic counter with a UUID v7 suffix, so ids
//! are collision-free for the lifetime of the process and remain unguessable
//! by other pages sharing the channel.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Correlation id echoed by the host on every response envelope.
///
/// On the wire this is an opaque string; equality and hashing are on the
/// full string, so ids received from the host correlate even if they were
/// generated by an earlier bridge instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a fresh unique request id (counter + UUID v7 suffix).
    pub fn new() -> Self {
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self(format!("{}-{}", seq, Uuid::now_v7().simple()))
    }

    /// Wrap an id received from the wire.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RequestId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl AsRef<str> for RequestId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
