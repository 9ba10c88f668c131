//! # End-to-End WebSocket Tests
//!
//! Full `NodeRuntime` instances on localhost, linked over real sockets.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures_util::{SinkExt, Stream, StreamExt};
    use hc_01_ledger::LedgerApi;
    use hc_03_replication::ReplicationApi;
    use node_runtime::{ListenAddrs, NodeConfig, NodeRuntime};
    use shared_types::ProtocolMessage;
    use tokio::time::Instant;
    use tokio_tungstenite::connect_async;
    use tokio_tungstenite::tungstenite::{Error as WsError, Message};

    fn local_config() -> NodeConfig {
        let mut config = NodeConfig::default();
        config.network.bind_host = "127.0.0.1".to_string();
        config.network.http_port = 0;
        config.network.p2p_port = 0;
        config
    }

    async fn start_node(config: NodeConfig) -> (NodeRuntime, ListenAddrs) {
        let runtime = NodeRuntime::new(config);
        let addrs = runtime.start().await.unwrap();
        (runtime, addrs)
    }

    async fn eventually<F: Fn() -> bool>(what: &str, check: F) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !check() {
            assert!(Instant::now() < deadline, "timed out waiting for {what}");
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }

    async fn next_text<S>(ws: &mut S) -> String
    where
        S: Stream<Item = Result<Message, WsError>> + Unpin,
    {
        loop {
            match ws.next().await {
                Some(Ok(Message::Text(text))) => return text.as_str().to_string(),
                Some(Ok(_)) => continue,
                other => panic!("expected a text frame, got {other:?}"),
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_two_nodes_sync_over_websocket() {
        let (a, a_addrs) = start_node(local_config()).await;
        for i in 0..3 {
            a.replication().submit_data(format!("a-{i}")).unwrap();
        }
        let (b, _) = start_node(local_config()).await;

        b.transport()
            .dial(&format!("ws://{}", a_addrs.p2p))
            .await
            .unwrap();

        eventually("b to catch up", || b.replication().ledger().len() == 4).await;
        assert_eq!(a.replication().chain(), b.replication().chain());
        eventually("a to register b", || a.registry().len() == 1).await;

        let block = a.replication().submit_data("live".to_string()).unwrap();
        eventually("b to receive the live block", || {
            b.replication().ledger().latest() == block
        })
        .await;

        let block = b.replication().submit_data("reply".to_string()).unwrap();
        eventually("a to receive b's block", || {
            a.replication().ledger().latest() == block
        })
        .await;

        a.shutdown().await;
        b.shutdown().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_initial_peers_are_dialed_at_start() {
        let (a, a_addrs) = start_node(local_config()).await;
        a.replication().submit_data("seed".to_string()).unwrap();

        let mut config = local_config();
        config.network.initial_peers = vec![format!("ws://{}", a_addrs.p2p)];
        let (b, _) = start_node(config).await;

        eventually("b to sync from its initial peer", || {
            b.replication().chain() == a.replication().chain()
        })
        .await;
        assert_eq!(b.registry().len(), 1);

        a.shutdown().await;
        b.shutdown().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_unreachable_initial_peer_is_not_fatal() {
        let mut config = local_config();
        config.network.initial_peers = vec!["ws://127.0.0.1:1".to_string()];
        let (node, _) = start_node(config).await;

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(node.registry().is_empty());
        assert!(node.replication().submit_data("still works".to_string()).is_ok());

        node.shutdown().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_raw_client_speaks_wire_protocol() {
        let (node, addrs) = start_node(local_config()).await;
        node.replication().submit_data("x".to_string()).unwrap();

        let (mut ws, _) = connect_async(format!("ws://{}", addrs.p2p)).await.unwrap();
        assert_eq!(next_text(&mut ws).await, r#"{"type":0}"#);

        ws.send(Message::text(r#"{"type":1}"#)).await.unwrap();
        let reply = ProtocolMessage::decode(&next_text(&mut ws).await).unwrap();
        assert_eq!(reply, ProtocolMessage::ChainPayload(node.replication().chain()));

        // Unknown types are skipped without closing the link.
        ws.send(Message::text(r#"{"type":7}"#)).await.unwrap();
        ws.send(Message::text(r#"{"type":0}"#)).await.unwrap();
        let reply = ProtocolMessage::decode(&next_text(&mut ws).await).unwrap();
        assert_eq!(
            reply,
            ProtocolMessage::latest(node.replication().ledger().latest())
        );
        assert_eq!(node.registry().len(), 1);

        ws.send(Message::text("not json")).await.unwrap();
        eventually("the malformed link to be dropped", || node.registry().is_empty()).await;

        node.shutdown().await;
    }

    fn padded_query(len: usize) -> String {
        let frame = format!(r#"{{"type":0,"pad":"{}"}}"#, "x".repeat(len));
        assert_eq!(frame.len(), len + 19);
        frame
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_frame_above_library_default_within_configured_limit() {
        let mut config = local_config();
        config.network.max_frame_bytes = 32 << 20;
        let (node, addrs) = start_node(config).await;

        let (mut ws, _) = connect_async(format!("ws://{}", addrs.p2p)).await.unwrap();
        next_text(&mut ws).await;

        ws.send(Message::text(padded_query(20 << 20))).await.unwrap();
        let reply = ProtocolMessage::decode(&next_text(&mut ws).await).unwrap();
        assert_eq!(
            reply,
            ProtocolMessage::latest(node.replication().ledger().latest())
        );
        assert_eq!(node.registry().len(), 1);

        node.shutdown().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_frame_over_configured_limit_drops_link() {
        let mut config = local_config();
        config.network.max_frame_bytes = 4096;
        let (node, addrs) = start_node(config).await;

        let (mut ws, _) = connect_async(format!("ws://{}", addrs.p2p)).await.unwrap();
        next_text(&mut ws).await;
        assert_eq!(node.registry().len(), 1);

        let _ = ws.send(Message::text(padded_query(8192))).await;
        eventually("the oversize link to be dropped", || node.registry().is_empty()).await;

        node.shutdown().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_client_disconnect_deregisters_link() {
        let (node, addrs) = start_node(local_config()).await;

        let (mut ws, _) = connect_async(format!("ws://{}", addrs.p2p)).await.unwrap();
        next_text(&mut ws).await;
        assert_eq!(node.registry().len(), 1);

        ws.close(None).await.unwrap();
        drop(ws);
        eventually("the closed link to be dropped", || node.registry().is_empty()).await;

        node.shutdown().await;
    }
}
