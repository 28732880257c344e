//! Environment detection: is this page hosted inside the expected webview?
//!
//! Three independent probes, combined with OR. Each probe reads one signal
//! from the embedding context through [`HostSignals`], so every probe is
//! testable in isolation. Detection never fails: with no execution context
//! attached it degrades to false, since webview-only signals cannot be
//! present in headless evaluation.

use std::sync::Arc;

/// Marker token the host injects into its runtime identity string and as a
/// structural tag on the root UI element.
pub const HOST_MARKER: &str = "MiniAppHost";

/// Read-only view of the signals the embedding context exposes.
pub trait HostSignals: Send + Sync {
    /// A host-provided native bridge object exists in the global scope.
    fn bridge_object_present(&self) -> bool;

    /// The runtime's identifying string (user agent), if one exists.
    fn runtime_identity(&self) -> Option<String>;

    /// The root UI element carries the host marker as a structural tag.
    fn root_marker_present(&self) -> bool;
}

/// Fixed snapshot of host signals, for embedders and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSignals {
    pub bridge_object: bool,
    pub identity: Option<String>,
    pub root_marker: bool,
}

impl HostSignals for StaticSignals {
    fn bridge_object_present(&self) -> bool {
        self.bridge_object
    }

    fn runtime_identity(&self) -> Option<String> {
        self.identity.clone()
    }

    fn root_marker_present(&self) -> bool {
        self.root_marker
    }
}

/// Detector gating every bridge operation.
///
/// Side-effect-free and callable any number of times, before any other
/// bridge component exists.
#[derive(Clone, Default)]
pub struct EnvironmentDetector {
    signals: Option<Arc<dyn HostSignals>>,
}

impl EnvironmentDetector {
    /// Detector reading from the given execution context.
    pub fn new(signals: Arc<dyn HostSignals>) -> Self {
        Self {
            signals: Some(signals),
        }
    }

    /// Detector with no execution context attached; always reports false.
    pub fn detached() -> Self {
        Self { signals: None }
    }

    /// True when any probe recognizes the expected host.
    pub fn detect(&self) -> bool {
        let Some(signals) = &self.signals else {
            return false;
        };
        let signals = signals.as_ref();

        probe_bridge_object(signals)
            || probe_runtime_identity(signals)
            || probe_root_marker(signals)
    }
}

fn probe_bridge_object(signals: &dyn HostSignals) -> bool {
    signals.bridge_object_present()
}

fn probe_runtime_identity(signals: &dyn HostSignals) -> bool {
    signals
        .runtime_identity()
        .is_some_and(|identity| identity.contains(HOST_MARKER))
}

fn probe_root_marker(signals: &dyn HostSignals) -> bool {
    signals.root_marker_present()
}
