//! Process-wide inbound listener lifecycle.
//!
//! The channel delivers each inbound message once, so exactly one physical
//! listener may exist: a second consumer would steal or double-process
//! responses. `start` is therefore idempotent, guarded by an atomic
//! installed flag, and `stop` tears the handler down and cancels all
//! still-pending requests.

use crate::domain::pending::PendingTable;
use crate::ports::{ChannelError, InboundSource};
use crate::wire::codec::{self, DecodeError};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace, warn};

/// Registrar owning the single inbound message handler.
pub struct ListenerRegistrar {
    pending: Arc<PendingTable>,
    source: Arc<dyn InboundSource>,
    installed: Arc<AtomicBool>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl ListenerRegistrar {
    pub fn new(pending: Arc<PendingTable>, source: Arc<dyn InboundSource>) -> Self {
        Self {
            pending,
            source,
            installed: Arc::new(AtomicBool::new(false)),
            handle: Mutex::new(None),
        }
    }

    /// Install the inbound handler. Idempotent: repeated calls while a
    /// listener is installed are no-ops. Returns true if this call
    /// installed it.
    pub fn start(&self) -> bool {
        if self.installed.swap(true, Ordering::SeqCst) {
            debug!("Inbound listener already installed");
            return false;
        }

        let pending = Arc::clone(&self.pending);
        let source = Arc::clone(&self.source);
        let installed = Arc::clone(&self.installed);

        let handle = tokio::spawn(async move {
            run_listener(pending, source).await;
            installed.store(false, Ordering::SeqCst);
        });

        *self.handle.lock() = Some(handle);
        true
    }

    /// Uninstall the handler and complete every pending request with
    /// CANCELLED. Returns the number of requests cancelled.
    pub fn stop(&self) -> usize {
        if let Some(handle) = self.handle.lock().take() {
            handle.abort();
        }
        self.installed.store(false, Ordering::SeqCst);
        self.pending.cancel_all()
    }

    /// Whether a listener is currently installed.
    pub fn is_installed(&self) -> bool {
        self.installed.load(Ordering::SeqCst)
    }
}

/// Listener loop: decode inbound messages and feed the correlation table.
async fn run_listener(pending: Arc<PendingTable>, source: Arc<dyn InboundSource>) {
    info!("Bridge inbound listener started");

    loop {
        match source.receive().await {
            Ok(raw) => handle_inbound(&pending, &raw),
            Err(ChannelError::Closed) => {
                warn!("Inbound channel closed, stopping listener");
                break;
            }
            Err(e) => {
                error!(error = %e, "Error receiving inbound message");
            }
        }
    }
}

/// Decode one raw message. Foreign and malformed messages are dropped,
/// never failing the process or any pending request.
fn handle_inbound(pending: &PendingTable, raw: &str) {
    match codec::decode_response(raw) {
        Ok(envelope) => {
            let request_id = envelope.request_id.clone();
            let result = envelope.into_result();
            if !pending.resolve(&request_id, result) {
                debug!(
                    request_id = %request_id,
                    "Response for unknown or already-settled request"
                );
            }
        }
        Err(DecodeError::Foreign) => {
            trace!("Ignoring message not addressed to the bridge");
        }
        Err(DecodeError::Malformed(reason)) => {
            warn!(%reason, "Dropping malformed bridge envelope");
        }
    }
}
