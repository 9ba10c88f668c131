//! # WebSocket Peer Transport
//!
//! Carries the peer protocol over WebSocket text frames, one JSON message per
//! frame.
//!
//! ## Link Tasks
//!
//! ```text
//!            ┌──────────── reader task ────────────┐
//! socket ──→ │ frame → decode → ReplicationApi     │ ──exit──→ on_peer_disconnected
//!            └─────────────────────────────────────┘
//!            ┌──────────── writer task ────────────┐
//! socket ←── │ encode ← link queue (PeerLink)      │ ←──queue closed── deregistration
//!            └─────────────────────────────────────┘
//! ```
//!
//! The reader deregisters the link when it exits for any reason. That drops
//! the registry's queue sender, the writer drains out and closes the socket.
//! A writer that fails to send deregisters the link the same way.
//!
//! ## Frame Limits
//!
//! `max_frame_bytes` is handed to tungstenite as both the frame and the
//! message limit, so an oversize frame fails while it is being read.
//! [`process_frame`] checks the length again before decoding.

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use hc_02_peer_registry::{PeerLink, PeerRegistry};
use hc_03_replication::{HandleOutcome, ReplicationApi, ReplicationError};
use hc_04_control_api::{ControlError, PeerConnector};
use shared_types::{LinkDirection, PeerId, ProtocolMessage, WireError};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::tungstenite::protocol::WebSocketConfig;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{accept_async_with_config, connect_async_with_config, WebSocketStream};
use tracing::{debug, info, warn};

/// Peer transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Invalid peer URL: {0:?}")]
    InvalidUrl(String),

    #[error("Failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: tokio_tungstenite::tungstenite::Error,
    },

    #[error("WebSocket handshake with {addr} failed: {source}")]
    Handshake {
        addr: SocketAddr,
        #[source]
        source: tokio_tungstenite::tungstenite::Error,
    },

    #[error("Frame of {size} bytes exceeds limit of {max}")]
    FrameTooLarge { size: usize, max: usize },

    #[error("Binary frames are not part of the protocol")]
    BinaryFrame,

    #[error("Transport is shutting down")]
    ShuttingDown,

    #[error(transparent)]
    Wire(#[from] WireError),

    #[error(transparent)]
    Replication(#[from] ReplicationError),
}

/// Accept only `ws://host[:port][/path]` URLs.
pub fn validate_peer_url(url: &str) -> Result<(), TransportError> {
    match url.strip_prefix("ws://") {
        Some(rest) if !rest.is_empty() && !rest.starts_with('/') => Ok(()),
        _ => Err(TransportError::InvalidUrl(url.to_string())),
    }
}

/// Per-link limits.
#[derive(Debug, Clone, Copy)]
pub struct TransportConfig {
    pub max_frame_bytes: usize,
    pub link_queue: usize,
}

impl TransportConfig {
    /// Socket-level limits for both handshake directions.
    pub fn websocket_config(&self) -> WebSocketConfig {
        WebSocketConfig::default()
            .max_message_size(Some(self.max_frame_bytes))
            .max_frame_size(Some(self.max_frame_bytes))
    }
}

/// Turn one text frame into protocol handling.
///
/// `Ok(None)` means the frame was skipped (unknown message type). Any error
/// means the link must be closed.
pub fn process_frame(
    replication: &dyn ReplicationApi,
    peer_id: PeerId,
    text: &str,
    max_frame_bytes: usize,
) -> Result<Option<HandleOutcome>, TransportError> {
    if text.len() > max_frame_bytes {
        return Err(TransportError::FrameTooLarge {
            size: text.len(),
            max: max_frame_bytes,
        });
    }

    let message = match ProtocolMessage::decode(text) {
        Ok(message) => message,
        Err(e) if !e.is_fatal() => {
            warn!(peer = %peer_id, error = %e, "Skipping frame");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let outcome = replication.handle_message(peer_id, message)?;
    debug!(peer = %peer_id, ?outcome, "Handled message");
    Ok(Some(outcome))
}

/// WebSocket listener and dialer for peer links.
#[derive(Clone)]
pub struct WsTransport {
    replication: Arc<dyn ReplicationApi>,
    registry: Arc<PeerRegistry>,
    config: TransportConfig,
    shutdown: watch::Receiver<bool>,
}

impl WsTransport {
    /// Links are refused once `shutdown` reads `true`.
    pub fn new(
        replication: Arc<dyn ReplicationApi>,
        registry: Arc<PeerRegistry>,
        config: TransportConfig,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            replication,
            registry,
            config,
            shutdown,
        }
    }

    fn is_shutting_down(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// Accept inbound links until `shutdown` flips.
    pub async fn accept_loop(self, listener: TcpListener, mut shutdown: watch::Receiver<bool>) {
        loop {
            tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok((stream, addr)) => {
                        let transport = self.clone();
                        tokio::spawn(async move {
                            if let Err(e) = transport.accept_link(stream, addr).await {
                                warn!(error = %e, "Inbound link failed");
                            }
                        });
                    }
                    Err(e) => warn!(error = %e, "Accept failed"),
                },
                _ = shutdown.changed() => {
                    info!("Peer listener stopping");
                    break;
                }
            }
        }
    }

    async fn accept_link(&self, stream: TcpStream, addr: SocketAddr) -> Result<PeerId, TransportError> {
        let ws = accept_async_with_config(stream, Some(self.config.websocket_config()))
            .await
            .map_err(|source| TransportError::Handshake { addr, source })?;
        self.spawn_link(ws, addr.to_string(), LinkDirection::Inbound)
    }

    /// Open an outbound link to `url` and start its tasks.
    pub async fn dial(&self, url: &str) -> Result<PeerId, TransportError> {
        validate_peer_url(url)?;
        if self.is_shutting_down() {
            return Err(TransportError::ShuttingDown);
        }
        let (ws, _) = connect_async_with_config(url, Some(self.config.websocket_config()), false)
            .await
            .map_err(|source| TransportError::Connect {
                url: url.to_string(),
                source,
            })?;
        self.spawn_link(ws, url.to_string(), LinkDirection::Outbound)
    }

    /// Dial in the background, logging the outcome.
    pub fn spawn_dial(&self, url: String) {
        let transport = self.clone();
        tokio::spawn(async move {
            if let Err(e) = transport.dial(&url).await {
                warn!(%url, error = %e, "Connection failed");
            }
        });
    }

    fn spawn_link<S>(
        &self,
        ws: WebSocketStream<S>,
        address: String,
        direction: LinkDirection,
    ) -> Result<PeerId, TransportError>
    where
        S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        if self.is_shutting_down() {
            return Err(TransportError::ShuttingDown);
        }
        let peer_id = self.registry.allocate_id();
        let (link, outbox) = PeerLink::new(peer_id, address.clone(), direction, self.config.link_queue);
        let (sink, stream) = ws.split();

        tokio::spawn(write_loop(Arc::clone(&self.replication), peer_id, sink, outbox));
        self.replication.on_peer_connected(link)?;
        // Shutdown may have swept the registry between the check above and
        // the registration.
        if self.is_shutting_down() {
            self.replication.on_peer_disconnected(peer_id);
            return Err(TransportError::ShuttingDown);
        }
        info!(peer = %peer_id, %address, ?direction, "Peer connected");

        tokio::spawn(read_loop(
            Arc::clone(&self.replication),
            peer_id,
            stream,
            self.config.max_frame_bytes,
        ));
        Ok(peer_id)
    }
}

impl PeerConnector for WsTransport {
    fn request_connection(&self, address: &str) -> Result<(), ControlError> {
        validate_peer_url(address)
            .map_err(|_| ControlError::InvalidPeerAddress(address.to_string()))?;
        if tokio::runtime::Handle::try_current().is_err() {
            return Err(ControlError::TransportUnavailable(
                "no async runtime".to_string(),
            ));
        }
        self.spawn_dial(address.to_string());
        Ok(())
    }
}

async fn read_loop<S>(
    replication: Arc<dyn ReplicationApi>,
    peer_id: PeerId,
    mut stream: SplitStream<WebSocketStream<S>>,
    max_frame_bytes: usize,
) where
    S: AsyncRead + AsyncWrite + Unpin,
{
    while let Some(frame) = stream.next().await {
        let result = match frame {
            Ok(Message::Text(text)) => {
                process_frame(replication.as_ref(), peer_id, text.as_str(), max_frame_bytes)
            }
            Ok(Message::Binary(_)) => Err(TransportError::BinaryFrame),
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                debug!(peer = %peer_id, error = %e, "Read failed");
                break;
            }
        };
        if let Err(e) = result {
            warn!(peer = %peer_id, error = %e, "Closing link");
            break;
        }
    }
    replication.on_peer_disconnected(peer_id);
}

async fn write_loop<S>(
    replication: Arc<dyn ReplicationApi>,
    peer_id: PeerId,
    mut sink: SplitSink<WebSocketStream<S>, Message>,
    mut outbox: mpsc::Receiver<ProtocolMessage>,
) where
    S: AsyncRead + AsyncWrite + Unpin,
{
    while let Some(message) = outbox.recv().await {
        let text = match message.encode() {
            Ok(text) => text,
            Err(e) => {
                warn!(peer = %peer_id, error = %e, "Failed to encode message");
                continue;
            }
        };
        if let Err(e) = sink.send(Message::text(text)).await {
            debug!(peer = %peer_id, error = %e, "Write failed");
            replication.on_peer_disconnected(peer_id);
            break;
        }
    }
    let _ = sink.close().await;
}
