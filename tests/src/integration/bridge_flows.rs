//! # Integration Test Flows
//!
//! Full round trips through an assembled bridge: client → codec → channel
//! → scripted host → inbound listener → correlation table → caller.
//!
//! ## Flows Tested
//!
//! 1. **Authenticate handshake**: nonce out, wallet/signature/message back
//! 2. **Deposit/withdraw**: txHash on SUCCESS, host error pass-through on FAILED
//! 3. **Channel noise**: foreign and malformed traffic never disturbs a flow
//! 4. **Lifecycle**: environment gating and teardown cancellation

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio::task::JoinHandle;

    use miniapp_bridge::adapters::channel::in_memory_pair;
    use miniapp_bridge::wire::{codec, RequestEnvelope, ResponseEnvelope};
    use miniapp_bridge::{
        codes, AuthData, AuthenticateParams, BridgeConfig, DepositParams, MiniAppBridge,
        StaticSignals, TxData, WithdrawParams,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn webview_signals() -> Arc<StaticSignals> {
        Arc::new(StaticSignals {
            bridge_object: true,
            ..Default::default()
        })
    }

    /// Assemble a bridge and return it with the host-side channel ends.
    fn bridge_with_host(
        config: BridgeConfig,
    ) -> (MiniAppBridge, mpsc::Receiver<String>, mpsc::Sender<String>) {
        let (channel, host_rx, in_tx, source) = in_memory_pair(16);
        let bridge =
            MiniAppBridge::new(config, Some(webview_signals()), channel, source).unwrap();
        bridge.start();
        (bridge, host_rx, in_tx)
    }

    /// Scripted host: decodes each outbound request and replies per `script`.
    fn spawn_host<F>(
        mut host_rx: mpsc::Receiver<String>,
        in_tx: mpsc::Sender<String>,
        script: F,
    ) -> JoinHandle<()>
    where
        F: Fn(RequestEnvelope) -> Option<ResponseEnvelope> + Send + 'static,
    {
        tokio::spawn(async move {
            while let Some(raw) = host_rx.recv().await {
                let request = codec::decode_request(&raw).expect("host received a bad request");
                if let Some(response) = script(request) {
                    let raw = codec::encode_response(&response).unwrap();
                    if in_tx.send(raw).await.is_err() {
                        break;
                    }
                }
            }
        })
    }

    // =============================================================================
    // AUTHENTICATE HANDSHAKE
    // =============================================================================

    #[tokio::test]
    async fn test_authenticate_round_trip() {
        let (bridge, host_rx, in_tx) = bridge_with_host(BridgeConfig::default());

        let _host = spawn_host(host_rx, in_tx, |request| {
            assert_eq!(request.payload["nonce"], "l3m0nc45h");
            Some(ResponseEnvelope::success(
                request.action,
                request.request_id,
                serde_json::json!({
                    "wallet": "0xabc",
                    "signature": "0xdef",
                    "message": "signed l3m0nc45h"
                }),
            ))
        });

        let result = bridge
            .client()
            .authenticate(AuthenticateParams {
                nonce: Some("l3m0nc45h".into()),
                chain_id: None,
            })
            .await
            .unwrap();

        let auth: AuthData = result.success_as().unwrap();
        assert_eq!(auth.wallet, "0xabc");
        assert_eq!(auth.signature, "0xdef");
        assert_eq!(bridge.pending().pending_count(), 0);
    }

    // =============================================================================
    // DEPOSIT / WITHDRAW
    // =============================================================================

    #[tokio::test]
    async fn test_deposit_returns_tx_hash() {
        let (bridge, host_rx, in_tx) = bridge_with_host(BridgeConfig::default());

        let _host = spawn_host(host_rx, in_tx, |request| {
            // Canonical token field name on the wire
            assert_eq!(request.payload["tokenName"], "LEMON");
            assert_eq!(request.payload["amount"], "42");
            Some(ResponseEnvelope::success(
                request.action,
                request.request_id,
                serde_json::json!({"txHash": "0xfeedbeef"}),
            ))
        });

        let result = bridge
            .client()
            .deposit(DepositParams {
                amount: "42".into(),
                token_name: "LEMON".into(),
                chain_id: None,
            })
            .await
            .unwrap();

        let tx: TxData = result.success_as().unwrap();
        assert_eq!(tx.tx_hash, "0xfeedbeef");
    }

    #[tokio::test]
    async fn test_host_failure_passes_through_verbatim() {
        let (bridge, host_rx, in_tx) = bridge_with_host(BridgeConfig::default());

        let _host = spawn_host(host_rx, in_tx, |request| {
            Some(ResponseEnvelope::failed(
                request.action,
                request.request_id,
                "NO_FUNDS",
                "insufficient balance",
            ))
        });

        let result = bridge
            .client()
            .withdraw(WithdrawParams {
                amount: "1000000".into(),
                token_name: "LEMON".into(),
            })
            .await
            .unwrap();

        let error = result.error().unwrap();
        assert_eq!(error.code, "NO_FUNDS");
        assert_eq!(error.message, "insufficient balance");
    }

    #[tokio::test]
    async fn test_host_cancellation() {
        let (bridge, host_rx, in_tx) = bridge_with_host(BridgeConfig::default());

        let _host = spawn_host(host_rx, in_tx, |request| {
            Some(ResponseEnvelope::cancelled(
                request.action,
                request.request_id,
            ))
        });

        let result = bridge
            .client()
            .deposit(DepositParams {
                amount: "1".into(),
                token_name: "LEMON".into(),
                chain_id: None,
            })
            .await
            .unwrap();

        assert!(result.is_cancelled());
    }

    // =============================================================================
    // CHANNEL NOISE
    // =============================================================================

    #[tokio::test]
    async fn test_noise_on_channel_does_not_disturb_flow() {
        let (bridge, host_rx, in_tx) = bridge_with_host(BridgeConfig::default());

        let noise_tx = in_tx.clone();
        let _host = spawn_host(host_rx, in_tx, move |request| {
            // Foreign and malformed traffic first, then the real response
            noise_tx.try_send("nonsense %%%".into()).unwrap();
            noise_tx
                .try_send(r#"{"type":"analytics","event":"tap"}"#.into())
                .unwrap();
            noise_tx
                .try_send(r#"{"action":"DEPOSIT_RESPONSE"}"#.into())
                .unwrap();
            Some(ResponseEnvelope::success(
                request.action,
                request.request_id,
                serde_json::json!({"txHash": "0x1"}),
            ))
        });

        let result = bridge
            .client()
            .deposit(DepositParams {
                amount: "1".into(),
                token_name: "LEMON".into(),
                chain_id: None,
            })
            .await
            .unwrap();

        assert!(result.is_success());
    }

    // =============================================================================
    // LIFECYCLE
    // =============================================================================

    #[tokio::test]
    async fn test_headless_bridge_gates_everything_locally() {
        let (channel, mut host_rx, _in_tx, source) = in_memory_pair(16);
        let bridge =
            MiniAppBridge::new(BridgeConfig::default(), None, channel, source).unwrap();
        bridge.start();

        assert!(!bridge.is_webview());

        let result = bridge
            .client()
            .deposit(DepositParams {
                amount: "1".into(),
                token_name: "LEMON".into(),
                chain_id: None,
            })
            .await
            .unwrap();

        assert_eq!(result.error().unwrap().code, codes::ENV_NOT_WEBVIEW);
        assert_eq!(bridge.pending().pending_count(), 0);
        assert!(host_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_shutdown_cancels_in_flight_request() {
        let (bridge, _host_rx, _in_tx) = bridge_with_host(BridgeConfig::default());
        let client = bridge.client();

        let in_flight = tokio::spawn(async move {
            client
                .deposit(DepositParams {
                    amount: "1".into(),
                    token_name: "LEMON".into(),
                    chain_id: None,
                })
                .await
                .unwrap()
        });

        // Let the request register and send
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(bridge.pending().pending_count(), 1);

        bridge.shutdown();

        let result = in_flight.await.unwrap();
        assert!(result.is_cancelled());
        assert_eq!(bridge.pending().pending_count(), 0);
    }
}
