//! Bridge client: one async operation per host action.
//!
//! Every operation follows the same path: environment gate → local
//! validation → register a pending entry → encode → one send → await the
//! outcome. A timeout or FAILED result is terminal; the bridge never
//! retries on the caller's behalf.

use crate::detect::EnvironmentDetector;
use crate::domain::config::BridgeConfig;
use crate::domain::error::{codes, BridgeError};
use crate::domain::pending::PendingTable;
use crate::domain::types::{
    AuthenticateParams, ContractCallParams, DepositParams, TransactionResult, WithdrawParams,
};
use crate::ports::MessageChannel;
use crate::wire::codec;
use crate::wire::envelope::{Action, RequestEnvelope};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Client performing bridge actions against the host.
pub struct BridgeClient {
    config: BridgeConfig,
    detector: EnvironmentDetector,
    pending: Arc<PendingTable>,
    channel: Arc<dyn MessageChannel>,
}

impl BridgeClient {
    pub fn new(
        config: BridgeConfig,
        detector: EnvironmentDetector,
        pending: Arc<PendingTable>,
        channel: Arc<dyn MessageChannel>,
    ) -> Self {
        Self {
            config,
            detector,
            pending,
            channel,
        }
    }

    /// Whether the page is hosted inside the expected webview.
    ///
    /// Synchronous, side-effect-free.
    pub fn is_webview(&self) -> bool {
        self.detector.detect()
    }

    /// Request a signed authentication handshake from the host wallet.
    ///
    /// On SUCCESS the data carries `{wallet, signature, message}`.
    pub async fn authenticate(
        &self,
        params: AuthenticateParams,
    ) -> Result<TransactionResult, BridgeError> {
        if let Some(blocked) = self.environment_gate() {
            return Ok(blocked);
        }

        if let Some(nonce) = &params.nonce {
            if !valid_nonce(nonce, self.config.min_nonce_len) {
                return Ok(TransactionResult::failed(
                    codes::INVALID_NONCE,
                    format!(
                        "nonce must be at least {} alphanumeric characters",
                        self.config.min_nonce_len
                    ),
                ));
            }
        }

        self.dispatch(Action::Authenticate, to_payload(&params)?)
            .await
    }

    /// Deposit a fixed token amount into the host wallet.
    ///
    /// On SUCCESS the data carries `{txHash}`.
    pub async fn deposit(&self, params: DepositParams) -> Result<TransactionResult, BridgeError> {
        if let Some(blocked) = self.environment_gate() {
            return Ok(blocked);
        }
        self.dispatch(Action::Deposit, to_payload(&params)?).await
    }

    /// Withdraw a token amount from the host wallet.
    pub async fn withdraw(&self, params: WithdrawParams) -> Result<TransactionResult, BridgeError> {
        if let Some(blocked) = self.environment_gate() {
            return Ok(blocked);
        }
        self.dispatch(Action::Withdraw, to_payload(&params)?).await
    }

    /// Ask the host to execute a smart contract call.
    pub async fn call_smart_contract(
        &self,
        params: ContractCallParams,
    ) -> Result<TransactionResult, BridgeError> {
        if let Some(blocked) = self.environment_gate() {
            return Ok(blocked);
        }
        self.dispatch(Action::CallSmartContract, to_payload(&params)?)
            .await
    }

    /// Gate every operation on the environment detector, before any table
    /// or codec work happens.
    fn environment_gate(&self) -> Option<TransactionResult> {
        if self.detector.detect() {
            None
        } else {
            Some(TransactionResult::failed(
                codes::ENV_NOT_WEBVIEW,
                "not running inside the expected host webview",
            ))
        }
    }

    /// Register, encode, send exactly once, and await the outcome.
    async fn dispatch(
        &self,
        action: Action,
        payload: serde_json::Map<String, serde_json::Value>,
    ) -> Result<TransactionResult, BridgeError> {
        let timeout = self.config.action_timeout;
        let (request_id, rx) = self.pending.register(action, Some(timeout));

        let envelope = RequestEnvelope {
            action,
            request_id: request_id.clone(),
            payload,
        };

        let raw = match codec::encode_request(&envelope) {
            Ok(raw) => raw,
            Err(e) => {
                // Codec misuse is a local bug; clean up and propagate hard
                self.pending.cancel(&request_id);
                return Err(e.into());
            }
        };

        if let Err(e) = self.channel.send(raw).await {
            self.pending.cancel(&request_id);
            return Ok(TransactionResult::failed(
                codes::CHANNEL_SEND,
                format!("failed to deliver request to the host: {e}"),
            ));
        }

        debug!(
            request_id = %request_id,
            action = action.as_str(),
            "Sent bridge request"
        );

        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(_)) => Ok(TransactionResult::failed(
                codes::CHANNEL_CLOSED,
                "completion handle dropped before a response arrived",
            )),
            Err(_) => {
                self.pending.expire(&request_id);
                Ok(TransactionResult::failed(
                    codes::TIMEOUT,
                    format!("no response within {}s", timeout.as_secs()),
                ))
            }
        }
    }
}

/// Nonce policy: at least `min_len` characters, alphanumeric only.
fn valid_nonce(nonce: &str, min_len: usize) -> bool {
    nonce.len() >= min_len && nonce.chars().all(|c| c.is_ascii_alphanumeric())
}

fn to_payload<T: Serialize>(
    params: &T,
) -> Result<serde_json::Map<String, serde_json::Value>, BridgeError> {
    match serde_json::to_value(params)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(BridgeError::Internal(format!(
            "action payload must serialize to a JSON object, got {other}"
        ))),
    }
}
