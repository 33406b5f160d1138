// File: src/main.rs
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use replicator::constants::{transfers, CLEANUP_INTERVAL};
use replicator::web::{start_web_server, AppState};
use replicator::{
    ConfigManager, Database, PeerLink, ReplicationClient, ReplicationListener, SnapshotExporter,
    SnapshotImporter, StaticPeerLink, SyncService, TransferTracker,
};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("replicator=info".parse()?)
        .add_directive("tower_http=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("sqlx=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    info!("Starting record replicator");

    let config_dir =
        std::env::var("REPLICATOR_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let config_manager = ConfigManager::new(config_dir).await?;
    let config = config_manager.get_current_config();
    info!(
        "Device {} with {} configured peers",
        config.device_name,
        config.peers.len()
    );

    let database = Arc::new(Database::new(&config.database_path).await?);
    let transfer_tracker = Arc::new(TransferTracker::new());

    let exporter = Arc::new(SnapshotExporter::new(database.clone()));
    let importer = Arc::new(SnapshotImporter::new(database.clone()));
    let client = Arc::new(ReplicationClient::new(exporter));
    let link: Arc<dyn PeerLink> = Arc::new(StaticPeerLink::new(config.peers.clone()));
    let sync_service = Arc::new(SyncService::new(link, client, transfer_tracker.clone()));

    // Receiving side runs for the whole process lifetime
    let listener = Arc::new(ReplicationListener::new(importer, transfer_tracker.clone()));
    let tcp_listener = ReplicationListener::bind(&config.replication_addr()).await?;
    let listener_task = tokio::spawn(listener.serve(tcp_listener));

    let tracker_clone = transfer_tracker.clone();
    let cleanup_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            let cleaned = tracker_clone
                .cleanup_stuck_transfers(transfers::STUCK_TRANSFER_HOURS)
                .await;
            if cleaned > 0 {
                warn!(
                    "Cleaned up {} outbound transfers stuck for more than {} hours",
                    cleaned,
                    transfers::STUCK_TRANSFER_HOURS
                );
            }
        }
    });

    let state = AppState::new(config, database.clone(), sync_service, transfer_tracker);

    tokio::select! {
        result = start_web_server(state) => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutdown requested"),
    }

    listener_task.abort();
    cleanup_task.abort();
    database.close().await;
    info!("Replicator stopped");

    Ok(())
}
