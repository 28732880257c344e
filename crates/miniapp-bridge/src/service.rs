//! Bridge service: wires the detector, correlation table, client, and
//! listener together and owns their lifecycle.

use crate::client::BridgeClient;
use crate::detect::{EnvironmentDetector, HostSignals};
use crate::domain::config::BridgeConfig;
use crate::domain::error::BridgeError;
use crate::domain::pending::{self, PendingTable};
use crate::listener::ListenerRegistrar;
use crate::ports::{InboundSource, MessageChannel};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Assembled bridge: client, listener, and background expiry sweep.
pub struct MiniAppBridge {
    config: BridgeConfig,
    client: Arc<BridgeClient>,
    registrar: Arc<ListenerRegistrar>,
    pending: Arc<PendingTable>,
    sweep_handle: Mutex<Option<JoinHandle<()>>>,
}

impl MiniAppBridge {
    /// Assemble a bridge over the given channel halves.
    ///
    /// `signals` is the embedding context's signal surface; pass `None`
    /// in headless evaluation, where every operation resolves to the
    /// environment failure without touching the channel.
    pub fn new(
        config: BridgeConfig,
        signals: Option<Arc<dyn HostSignals>>,
        channel: Arc<dyn MessageChannel>,
        source: Arc<dyn InboundSource>,
    ) -> Result<Self, BridgeError> {
        config.validate()?;

        let pending = Arc::new(PendingTable::new(config.action_timeout));
        let detector = signals
            .map(EnvironmentDetector::new)
            .unwrap_or_else(EnvironmentDetector::detached);

        let client = Arc::new(BridgeClient::new(
            config.clone(),
            detector,
            Arc::clone(&pending),
            channel,
        ));
        let registrar = Arc::new(ListenerRegistrar::new(Arc::clone(&pending), source));

        Ok(Self {
            config,
            client,
            registrar,
            pending,
            sweep_handle: Mutex::new(None),
        })
    }

    /// Install the inbound listener and start the expiry sweep.
    ///
    /// Idempotent, like the listener installation it delegates to.
    pub fn start(&self) {
        if !self.registrar.start() {
            return;
        }

        let pending = Arc::clone(&self.pending);
        let interval = self.config.sweep_interval;
        let handle = tokio::spawn(async move {
            pending::cleanup_task(pending, interval).await;
        });
        *self.sweep_handle.lock() = Some(handle);

        info!(
            timeout_s = self.config.action_timeout.as_secs(),
            "Bridge started"
        );
    }

    /// Tear the bridge down: stop the sweep, uninstall the listener, and
    /// complete every pending request with CANCELLED.
    pub fn shutdown(&self) -> usize {
        if let Some(handle) = self.sweep_handle.lock().take() {
            handle.abort();
        }
        let cancelled = self.registrar.stop();
        info!(cancelled, "Bridge stopped");
        cancelled
    }

    /// The action client.
    pub fn client(&self) -> Arc<BridgeClient> {
        Arc::clone(&self.client)
    }

    /// The correlation table (for inspection and host simulators).
    pub fn pending(&self) -> Arc<PendingTable> {
        Arc::clone(&self.pending)
    }

    /// Whether the page is hosted inside the expected webview.
    pub fn is_webview(&self) -> bool {
        self.client.is_webview()
    }
}
