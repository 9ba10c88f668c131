//! # Node Runtime
//!
//! Wires the subsystems together and owns the listeners.
//!
//! ## Startup Sequence
//!
//! 1. Build genesis and the ledger from configuration
//! 2. Bind the peer listener and the control API listener
//! 3. Start the accept loop and the HTTP server
//! 4. Dial the configured initial peers (failures are logged, not retried)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use hc_01_ledger::Ledger;
use hc_02_peer_registry::PeerRegistry;
use hc_03_replication::ReplicationService;
use hc_04_control_api::ControlApiService;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info};

use crate::config::NodeConfig;
use crate::transport::{TransportConfig, WsTransport};

/// Replication service as wired by the runtime.
pub type NodeReplication = ReplicationService<Ledger, PeerRegistry>;

/// Addresses the listeners actually bound to.
#[derive(Debug, Clone, Copy)]
pub struct ListenAddrs {
    pub http: SocketAddr,
    pub p2p: SocketAddr,
}

/// The running node.
pub struct NodeRuntime {
    config: NodeConfig,
    registry: Arc<PeerRegistry>,
    replication: Arc<NodeReplication>,
    transport: WsTransport,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl NodeRuntime {
    pub fn new(config: NodeConfig) -> Self {
        let ledger = Arc::new(Ledger::new(&config.genesis));
        let registry = Arc::new(PeerRegistry::new());
        let replication = Arc::new(ReplicationService::new(ledger, Arc::clone(&registry)));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let transport = WsTransport::new(
            replication.clone(),
            Arc::clone(&registry),
            TransportConfig {
                max_frame_bytes: config.network.max_frame_bytes,
                link_queue: config.network.link_queue,
            },
            shutdown_rx.clone(),
        );

        Self {
            config,
            registry,
            replication,
            transport,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Bind both listeners, start serving and dial initial peers.
    pub async fn start(&self) -> Result<ListenAddrs> {
        let net = &self.config.network;

        let p2p_listener = TcpListener::bind((net.bind_host.as_str(), net.p2p_port))
            .await
            .with_context(|| format!("Failed to bind peer listener on {}:{}", net.bind_host, net.p2p_port))?;
        let http_listener = TcpListener::bind((net.bind_host.as_str(), net.http_port))
            .await
            .with_context(|| format!("Failed to bind control API on {}:{}", net.bind_host, net.http_port))?;
        let addrs = ListenAddrs {
            http: http_listener.local_addr()?,
            p2p: p2p_listener.local_addr()?,
        };

        tokio::spawn(
            self.transport
                .clone()
                .accept_loop(p2p_listener, self.shutdown_rx.clone()),
        );

        let control = ControlApiService::new(
            self.replication.clone(),
            Arc::new(self.transport.clone()),
        );
        let mut http_shutdown = self.shutdown_rx.clone();
        tokio::spawn(async move {
            let signal = async move {
                let _ = http_shutdown.changed().await;
            };
            if let Err(e) = control.serve(http_listener, signal).await {
                error!(error = %e, "Control API stopped");
            }
        });

        for peer in &net.initial_peers {
            self.transport.spawn_dial(peer.clone());
        }

        info!(
            http = %addrs.http,
            p2p = %addrs.p2p,
            genesis = %self.config.genesis.hash,
            initial_peers = net.initial_peers.len(),
            "Node started"
        );
        Ok(addrs)
    }

    /// Stop the listeners and close every peer link.
    ///
    /// Dials and handshakes still in flight are refused when they complete.
    pub async fn shutdown(&self) {
        info!("Initiating graceful shutdown...");

        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }

        for peer in self.registry.peers() {
            self.registry.remove(peer.peer_id);
        }

        info!("Shutdown complete");
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn replication(&self) -> &Arc<NodeReplication> {
        &self.replication
    }

    pub fn registry(&self) -> &Arc<PeerRegistry> {
        &self.registry
    }

    pub fn transport(&self) -> &WsTransport {
        &self.transport
    }
}
