// File: src/web/server.rs
use crate::web::{handlers, AppState};
use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub async fn start_web_server(state: AppState) -> Result<()> {
    let addr = state.config.control_addr();
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Control API running on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::get_health))
        // === DISCOVERY AND SYNC ROUTES ===
        .route("/api/peers", get(handlers::list_peers))
        .route("/api/peers/{peer_name}/send", post(handlers::send_to_peer))
        // === STATUS ROUTES ===
        .route("/api/transfers", get(handlers::get_transfers))
        .route("/api/datastore/tables", get(handlers::get_table_counts))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
