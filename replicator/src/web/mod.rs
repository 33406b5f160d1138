// File: src/web/mod.rs
pub mod handlers;
pub mod server;

pub use server::{create_router, start_web_server};

use std::sync::Arc;

use crate::config::Config;
use crate::database::Database;
use crate::services::SyncService;
use crate::transfer_tracker::TransferTracker;

// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub database: Arc<Database>,
    pub sync_service: Arc<SyncService>,
    pub transfer_tracker: Arc<TransferTracker>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        database: Arc<Database>,
        sync_service: Arc<SyncService>,
        transfer_tracker: Arc<TransferTracker>,
    ) -> Self {
        Self {
            config,
            database,
            sync_service,
            transfer_tracker,
        }
    }
}
