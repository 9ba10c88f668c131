//! # Control API Service
//!
//! Builds the axum router and serves it until shutdown.

use std::future::Future;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use hc_03_replication::ReplicationApi;
use shared_types::Block;
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::domain::{AddPeerRequest, ControlError, MineBlockRequest};
use crate::ports::outbound::PeerConnector;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub replication: Arc<dyn ReplicationApi>,
    pub connector: Arc<dyn PeerConnector>,
}

/// HTTP control surface of one node.
pub struct ControlApiService {
    state: AppState,
}

impl ControlApiService {
    pub fn new(replication: Arc<dyn ReplicationApi>, connector: Arc<dyn PeerConnector>) -> Self {
        Self {
            state: AppState {
                replication,
                connector,
            },
        }
    }

    /// Build the router with every control route.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/blocks", get(list_blocks))
            .route("/mineBlock", post(mine_block))
            .route("/peers", get(list_peers))
            .route("/addPeer", post(add_peer))
            .route("/health", get(health_check))
            .with_state(self.state.clone())
    }

    /// Serve on `listener` until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        info!(%addr, "Control API listening");
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}

async fn list_blocks(State(state): State<AppState>) -> Json<Vec<Block>> {
    Json(state.replication.chain())
}

async fn mine_block(
    State(state): State<AppState>,
    Json(request): Json<MineBlockRequest>,
) -> Result<Json<Block>, ControlError> {
    let block = state.replication.submit_data(request.data)?;
    Ok(Json(block))
}

async fn list_peers(State(state): State<AppState>) -> Json<Vec<String>> {
    let addresses = state
        .replication
        .peers()
        .into_iter()
        .map(|p| p.address)
        .collect();
    Json(addresses)
}

async fn add_peer(
    State(state): State<AppState>,
    Json(request): Json<AddPeerRequest>,
) -> Result<StatusCode, ControlError> {
    debug!(peer = %request.peer, "Peer connection requested");
    state.connector.request_connection(&request.peer)?;
    Ok(StatusCode::ACCEPTED)
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "control-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
