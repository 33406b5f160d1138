// Transfer and datastore status endpoints

use axum::{extract::State, http::StatusCode, response::Json};
use tracing::error;

use super::common::{ApiResponse, ApiResult};
use crate::database::TableCount;
use crate::transfer_tracker::TransferOverview;
use crate::web::AppState;

/// Active outbound transfers plus recent history in both directions
pub async fn get_transfers(State(state): State<AppState>) -> ApiResult<TransferOverview> {
    let overview = state.transfer_tracker.get_overview().await;
    Ok(Json(ApiResponse::success(overview)))
}

/// Row count of every tracked table
pub async fn get_table_counts(State(state): State<AppState>) -> ApiResult<Vec<TableCount>> {
    match state.database.table_counts().await {
        Ok(counts) => Ok(Json(ApiResponse::success(counts))),
        Err(e) => {
            error!("Failed to count table rows: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string())),
            ))
        }
    }
}
