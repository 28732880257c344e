//! Outbound ports: the seams between the bridge and its physical channel.
//!
//! The underlying webview transport differs per host platform; the bridge
//! only needs one outbound send path and one inbound message stream.

use async_trait::async_trait;

/// Channel transport errors.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("channel closed")]
    Closed,
    #[error("send failed: {0}")]
    SendFailed(String),
}

/// Outbound half: delivers serialized envelopes to the host.
#[async_trait]
pub trait MessageChannel: Send + Sync {
    /// Deliver one serialized envelope to the host.
    async fn send(&self, raw: String) -> Result<(), ChannelError>;
}

/// Inbound half: the single stream of raw messages from the host.
///
/// The channel delivers each inbound message once, which is why the
/// listener registrar installs exactly one consumer of this source.
#[async_trait]
pub trait InboundSource: Send + Sync {
    /// Receive the next raw inbound message (pends until one arrives).
    async fn receive(&self) -> Result<String, ChannelError>;
}
