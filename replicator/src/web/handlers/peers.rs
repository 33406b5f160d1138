// Discovery and send endpoints

use axum::{
    extract::{Path, State},
    response::Json,
};
use tracing::{error, info};

use super::common::{error_response, ApiResponse, ApiResult};
use crate::link::PeerDescriptor;
use crate::replication::SendReport;
use crate::web::AppState;

/// List peers visible to the link service
pub async fn list_peers(State(state): State<AppState>) -> ApiResult<Vec<PeerDescriptor>> {
    match state.sync_service.discover().await {
        Ok(peers) => Ok(Json(ApiResponse::success(peers))),
        Err(e) => {
            error!("Peer discovery failed: {}", e);
            Err(error_response(&e))
        }
    }
}

/// Connect to a peer and push a full snapshot.
///
/// The response reports bytes written; the peer never confirms the import.
pub async fn send_to_peer(
    Path(peer_name): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<SendReport> {
    info!("Sync requested to {}", peer_name);

    match state.sync_service.send_to_peer(&peer_name).await {
        Ok(report) => Ok(Json(ApiResponse::success(report))),
        Err(e) => Err(error_response(&e)),
    }
}
