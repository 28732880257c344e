//! Bridge error types and machine-readable failure codes.
//!
//! Most failures are returned as values inside [`TransactionResult::Failed`]
//! carrying one of the string codes below; only catastrophic local bugs
//! (codec misuse, invalid configuration) propagate as [`BridgeError`].
//!
//! [`TransactionResult::Failed`]: crate::domain::types::TransactionResult::Failed

use crate::domain::config::ConfigError;

/// Machine-readable failure codes carried in `TransactionError.code`.
///
/// Host-supplied codes pass through verbatim; these cover failures the
/// bridge itself produces locally.
pub mod codes {
    /// Operation invoked outside the expected host webview.
    pub const ENV_NOT_WEBVIEW: &str = "ENV_NOT_WEBVIEW";
    /// Local parameter validation failed (e.g. short nonce).
    pub const INVALID_NONCE: &str = "INVALID_NONCE";
    /// No response within the configured window.
    pub const TIMEOUT: &str = "TIMEOUT";
    /// Outbound delivery to the host failed.
    pub const CHANNEL_SEND: &str = "CHANNEL_SEND";
    /// Completion handle dropped before a response arrived.
    pub const CHANNEL_CLOSED: &str = "CHANNEL_CLOSED";
    /// Host reported FAILED without a structured error payload.
    pub const HOST_FAILED: &str = "HOST_FAILED";
}

/// Hard failures surfaced to the caller of a bridge operation.
///
/// These indicate local bugs or misconfiguration, never a host decision;
/// host decisions are always values.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// Configuration rejected by validation.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A payload failed to serialize into an envelope.
    #[error("payload serialization failed: {0}")]
    Codec(#[from] serde_json::Error),

    /// Internal invariant violation.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
