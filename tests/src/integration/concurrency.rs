//! # Concurrency Tests
//!
//! In-flight requests are independent: responses may arrive in any order,
//! may arrive after the waiting caller already gave up, or may arrive more
//! than once. Correlation is strictly by request id.

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;

    use miniapp_bridge::adapters::channel::in_memory_pair;
    use miniapp_bridge::wire::{codec, ResponseEnvelope};
    use miniapp_bridge::{codes, BridgeConfig, DepositParams, MiniAppBridge, StaticSignals, TxData};

    fn assembled(config: BridgeConfig) -> (MiniAppBridge, mpsc::Receiver<String>, mpsc::Sender<String>) {
        let (channel, host_rx, in_tx, source) = in_memory_pair(32);
        let signals = Arc::new(StaticSignals {
            bridge_object: true,
            ..Default::default()
        });
        let bridge = MiniAppBridge::new(config, Some(signals), channel, source).unwrap();
        bridge.start();
        (bridge, host_rx, in_tx)
    }

    fn deposit_of(amount: &str) -> DepositParams {
        DepositParams {
            amount: amount.into(),
            token_name: "LEMON".into(),
            chain_id: None,
        }
    }

    /// Reply to each request with a txHash derived from its amount field.
    fn hash_response(raw: &str) -> String {
        let request = codec::decode_request(raw).unwrap();
        let amount = request.payload["amount"].as_str().unwrap().to_owned();
        let response = ResponseEnvelope::success(
            request.action,
            request.request_id,
            serde_json::json!({"txHash": format!("0x{amount}")}),
        );
        codec::encode_response(&response).unwrap()
    }

    #[tokio::test]
    async fn test_out_of_order_responses_reach_their_own_callers() {
        let (bridge, mut host_rx, in_tx) = assembled(BridgeConfig::default());

        let host = tokio::spawn(async move {
            let first = host_rx.recv().await.unwrap();
            let second = host_rx.recv().await.unwrap();
            // Respond in reverse arrival order
            in_tx.send(hash_response(&second)).await.unwrap();
            in_tx.send(hash_response(&first)).await.unwrap();
        });

        let client_a = bridge.client();
        let client_b = bridge.client();
        let (a, b) = tokio::join!(
            client_a.deposit(deposit_of("11")),
            client_b.deposit(deposit_of("22")),
        );

        let a: TxData = a.unwrap().success_as().unwrap();
        let b: TxData = b.unwrap().success_as().unwrap();
        assert_eq!(a.tx_hash, "0x11");
        assert_eq!(b.tx_hash, "0x22");
        assert_eq!(bridge.pending().pending_count(), 0);
        host.await.unwrap();
    }

    #[tokio::test]
    async fn test_many_in_flight_requests_resolve_independently() {
        let (bridge, mut host_rx, in_tx) = assembled(BridgeConfig::default());
        let count = 8;

        let host = tokio::spawn(async move {
            let mut batch = Vec::with_capacity(count);
            for _ in 0..count {
                batch.push(host_rx.recv().await.unwrap());
            }
            for raw in batch.into_iter().rev() {
                in_tx.send(hash_response(&raw)).await.unwrap();
            }
        });

        let callers: Vec<_> = (0..count)
            .map(|i| {
                let client = bridge.client();
                tokio::spawn(async move { client.deposit(deposit_of(&i.to_string())).await })
            })
            .collect();

        for (i, caller) in callers.into_iter().enumerate() {
            let tx: TxData = caller.await.unwrap().unwrap().success_as().unwrap();
            assert_eq!(tx.tx_hash, format!("0x{i}"));
        }
        assert_eq!(bridge.pending().pending_count(), 0);
        assert_eq!(
            bridge.pending().stats().total_completed.load(Ordering::Relaxed),
            count as u64
        );
        host.await.unwrap();
    }

    #[tokio::test]
    async fn test_late_response_after_timeout_is_ignored() {
        let config = BridgeConfig {
            action_timeout: Duration::from_millis(50),
            ..Default::default()
        };
        let (bridge, mut host_rx, in_tx) = assembled(config);

        let result = bridge.client().deposit(deposit_of("1")).await.unwrap();
        assert_eq!(result.error().unwrap().code, codes::TIMEOUT);
        assert_eq!(bridge.pending().pending_count(), 0);
        assert_eq!(
            bridge.pending().stats().total_timeouts.load(Ordering::Relaxed),
            1
        );

        // The host answers too late; delivery must be a silent no-op
        let raw = host_rx.recv().await.unwrap();
        in_tx.send(hash_response(&raw)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(
            bridge.pending().stats().total_completed.load(Ordering::Relaxed),
            0
        );
    }

    #[tokio::test]
    async fn test_duplicate_response_delivery_is_ignored() {
        let (bridge, mut host_rx, in_tx) = assembled(BridgeConfig::default());

        let host = tokio::spawn(async move {
            let raw = host_rx.recv().await.unwrap();
            let response = hash_response(&raw);
            in_tx.send(response.clone()).await.unwrap();
            in_tx.send(response).await.unwrap();
            in_tx
        });

        let result = bridge.client().deposit(deposit_of("7")).await.unwrap();
        let tx: TxData = result.success_as().unwrap();
        assert_eq!(tx.tx_hash, "0x7");

        // Keep the feed open until the duplicate has been consumed
        let in_tx = host.await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(in_tx);

        assert_eq!(
            bridge.pending().stats().total_completed.load(Ordering::Relaxed),
            1
        );
        assert_eq!(bridge.pending().pending_count(), 0);
    }
}
