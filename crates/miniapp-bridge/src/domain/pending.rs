//! Correlation table tracking in-flight bridge requests.
//!
//! Maps request ids to waiting callers. Each entry owns a oneshot sender
//! completed exactly once by whichever settles it first: a host response,
//! a timeout, or teardown. Removal from the table before completion is
//! what enforces the exactly-once guarantee.

use crate::domain::correlation::RequestId;
use crate::domain::error::codes;
use crate::domain::types::TransactionResult;
use crate::wire::Action;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// A pending request waiting for a response
struct PendingRequest {
    /// Channel completing the caller's awaited future
    sender: oneshot::Sender<TransactionResult>,
    /// When the request was created
    created_at: Instant,
    /// Action name (for logging)
    action: Action,
    /// Timeout for this request
    timeout: Duration,
}

/// Statistics for the correlation table
#[derive(Debug, Default)]
pub struct BridgeStats {
    /// Total requests registered
    pub total_registered: AtomicU64,
    /// Total requests completed by a host response
    pub total_completed: AtomicU64,
    /// Total requests that timed out
    pub total_timeouts: AtomicU64,
    /// Total requests cancelled (teardown, send failure, dropped caller)
    pub total_cancelled: AtomicU64,
}

/// Correlation table for in-flight requests.
///
/// Flow:
/// 1. The client calls `register()` and gets a oneshot receiver
/// 2. The client sends the encoded envelope with the returned id
/// 3. The inbound listener decodes a response and calls `resolve()`
/// 4. The client awaits the receiver or times out
///
/// Responses may arrive in any order; correlation is strictly by id.
pub struct PendingTable {
    /// Map of request id to pending request
    pending: DashMap<RequestId, PendingRequest>,
    /// Default timeout
    default_timeout: Duration,
    /// Statistics
    stats: Arc<BridgeStats>,
}

impl PendingTable {
    /// Create a new correlation table
    pub fn new(default_timeout: Duration) -> Self {
        Self {
            pending: DashMap::new(),
            default_timeout,
            stats: Arc::new(BridgeStats::default()),
        }
    }

    /// Register a pending request and get a receiver for its outcome.
    ///
    /// Returns the fresh request id and a receiver the caller awaits.
    pub fn register(
        &self,
        action: Action,
        timeout: Option<Duration>,
    ) -> (RequestId, oneshot::Receiver<TransactionResult>) {
        let request_id = RequestId::new();
        let (tx, rx) = oneshot::channel();

        let request = PendingRequest {
            sender: tx,
            created_at: Instant::now(),
            action,
            timeout: timeout.unwrap_or(self.default_timeout),
        };

        self.pending.insert(request_id.clone(), request);
        self.stats.total_registered.fetch_add(1, Ordering::Relaxed);

        debug!(
            request_id = %request_id,
            action = action.as_str(),
            "Registered pending request"
        );

        (request_id, rx)
    }

    /// Complete a pending request with an outcome.
    ///
    /// Returns true if the request was found and completed. Unknown,
    /// duplicate, and late ids are a no-op returning false: a response
    /// is never delivered twice.
    pub fn resolve(&self, request_id: &RequestId, result: TransactionResult) -> bool {
        if let Some((_, pending)) = self.pending.remove(request_id) {
            let response_time = pending.created_at.elapsed();

            match pending.sender.send(result) {
                Ok(()) => {
                    self.stats.total_completed.fetch_add(1, Ordering::Relaxed);
                    debug!(
                        request_id = %request_id,
                        action = pending.action.as_str(),
                        response_time_ms = response_time.as_millis(),
                        "Completed pending request"
                    );
                    true
                }
                Err(_) => {
                    // Receiver was dropped (caller gave up)
                    self.stats.total_cancelled.fetch_add(1, Ordering::Relaxed);
                    debug!(
                        request_id = %request_id,
                        action = pending.action.as_str(),
                        "Pending request receiver dropped"
                    );
                    false
                }
            }
        } else {
            debug!(
                request_id = %request_id,
                "Response for unknown or already-settled request id"
            );
            false
        }
    }

    /// Remove a pending request without delivering an outcome.
    ///
    /// Used after a failed send, when the caller already produced the
    /// failure value itself.
    pub fn cancel(&self, request_id: &RequestId) -> bool {
        if self.pending.remove(request_id).is_some() {
            self.stats.total_cancelled.fetch_add(1, Ordering::Relaxed);
            true
        } else {
            false
        }
    }

    /// Expire a single request, completing it with FAILED/timeout.
    ///
    /// A no-op when the id already resolved: whichever of resolve and
    /// expiry removes the entry first wins.
    pub fn expire(&self, request_id: &RequestId) -> bool {
        if let Some((_, pending)) = self.pending.remove(request_id) {
            self.stats.total_timeouts.fetch_add(1, Ordering::Relaxed);
            warn!(
                request_id = %request_id,
                action = pending.action.as_str(),
                elapsed_ms = pending.created_at.elapsed().as_millis(),
                "Pending request timed out"
            );
            let _ = pending.sender.send(timeout_result(pending.timeout));
            true
        } else {
            false
        }
    }

    /// Expire every request whose timeout has elapsed.
    ///
    /// Returns the number of requests expired.
    pub fn remove_expired(&self) -> usize {
        let now = Instant::now();
        let expired: Vec<RequestId> = self
            .pending
            .iter()
            .filter(|entry| now.duration_since(entry.created_at) > entry.timeout)
            .map(|entry| entry.key().clone())
            .collect();

        let mut removed = 0;
        for request_id in &expired {
            if self.expire(request_id) {
                removed += 1;
            }
        }

        removed
    }

    /// Complete every still-pending request with CANCELLED.
    ///
    /// Used at environment teardown. Returns the number cancelled.
    pub fn cancel_all(&self) -> usize {
        let ids: Vec<RequestId> = self.pending.iter().map(|e| e.key().clone()).collect();

        let mut cancelled = 0;
        for request_id in &ids {
            if let Some((_, pending)) = self.pending.remove(request_id) {
                self.stats.total_cancelled.fetch_add(1, Ordering::Relaxed);
                let _ = pending.sender.send(TransactionResult::Cancelled);
                cancelled += 1;
            }
        }

        if cancelled > 0 {
            debug!(cancelled, "Cancelled all pending requests");
        }
        cancelled
    }

    /// Get the number of currently pending requests
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Check if a request id is pending
    pub fn is_pending(&self, request_id: &RequestId) -> bool {
        self.pending.contains_key(request_id)
    }

    /// Get statistics
    pub fn stats(&self) -> &BridgeStats {
        &self.stats
    }

    /// The timeout applied when `register` is called without one
    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }
}

fn timeout_result(timeout: Duration) -> TransactionResult {
    TransactionResult::failed(
        codes::TIMEOUT,
        format!("no response within {}s", timeout.as_secs()),
    )
}

/// Background task expiring timed-out requests
pub async fn cleanup_task(table: Arc<PendingTable>, interval: Duration) {
    let mut sweep = tokio::time::interval(interval);
    sweep.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        sweep.tick().await;
        let removed = table.remove_expired();
        if removed > 0 {
            debug!(removed, "Expired pending requests");
        }
    }
}
