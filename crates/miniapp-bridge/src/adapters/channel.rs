//! In-memory channel adapters backed by tokio mpsc.
//!
//! Used by the test suite and by host simulators; a real embedding would
//! implement [`MessageChannel`] and [`InboundSource`] over its platform's
//! webview message APIs.

use crate::ports::{ChannelError, InboundSource, MessageChannel};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Outbound adapter writing into an mpsc queue.
pub struct ChannelSender(pub mpsc::Sender<String>);

#[async_trait]
impl MessageChannel for ChannelSender {
    async fn send(&self, raw: String) -> Result<(), ChannelError> {
        self.0.send(raw).await.map_err(|_| ChannelError::Closed)
    }
}

/// Inbound adapter reading from an mpsc queue.
pub struct ChannelSource(tokio::sync::Mutex<mpsc::Receiver<String>>);

impl ChannelSource {
    pub fn new(rx: mpsc::Receiver<String>) -> Self {
        Self(tokio::sync::Mutex::new(rx))
    }
}

#[async_trait]
impl InboundSource for ChannelSource {
    async fn receive(&self) -> Result<String, ChannelError> {
        let mut guard = self.0.lock().await;
        guard.recv().await.ok_or(ChannelError::Closed)
    }
}

/// Create an in-memory channel pair.
///
/// Returns the web-side adapters plus the host-side raw ends:
/// `(outbound channel, host's view of outbound, host's inbound feed, inbound source)`.
pub fn in_memory_pair(
    buffer: usize,
) -> (
    Arc<ChannelSender>,
    mpsc::Receiver<String>,
    mpsc::Sender<String>,
    Arc<ChannelSource>,
) {
    let (out_tx, out_rx) = mpsc::channel(buffer);
    let (in_tx, in_rx) = mpsc::channel(buffer);
    (
        Arc::new(ChannelSender(out_tx)),
        out_rx,
        in_tx,
        Arc::new(ChannelSource::new(in_rx)),
    )
}
