// Liveness endpoint

use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use super::common::{ApiResponse, ApiResult};
use crate::web::AppState;

pub async fn get_health(State(state): State<AppState>) -> ApiResult<Value> {
    Ok(Json(ApiResponse::success(json!({
        "device_name": state.config.device_name,
        "replication_port": state.config.replication_port,
        "known_peers": state.config.peers.len(),
    }))))
}
