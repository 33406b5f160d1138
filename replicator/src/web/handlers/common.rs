// Common types and utilities for API handlers

use axum::{http::StatusCode, response::Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::{LinkError, ReplicationError, TransferError};

// Helper type for API responses
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<()>>)>;

#[derive(Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

pub fn error_status(error: &ReplicationError) -> StatusCode {
    match error {
        ReplicationError::Link(LinkError::UnknownPeer { .. }) => StatusCode::NOT_FOUND,
        ReplicationError::Link(LinkError::PeerDisabled { .. }) => StatusCode::CONFLICT,
        ReplicationError::Transfer(TransferError::PeerBusy { .. }) => StatusCode::CONFLICT,
        ReplicationError::Link(_) | ReplicationError::Transfer(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn error_response(error: &ReplicationError) -> (StatusCode, Json<ApiResponse<()>>) {
    (error_status(error), Json(ApiResponse::error(error.to_string())))
}
