// File: src/services/sync_service.rs
use crate::errors::ReplicationError;
use crate::link::{PeerDescriptor, PeerLink};
use crate::replication::{ReplicationClient, SendReport};
use crate::transfer_tracker::{TransferOutcome, TransferTracker};
use std::sync::Arc;
use tracing::{error, info};

/// Entry point for the UI actions: discover, connect, send
pub struct SyncService {
    link: Arc<dyn PeerLink>,
    client: Arc<ReplicationClient>,
    tracker: Arc<TransferTracker>,
}

impl SyncService {
    pub fn new(
        link: Arc<dyn PeerLink>,
        client: Arc<ReplicationClient>,
        tracker: Arc<TransferTracker>,
    ) -> Self {
        Self {
            link,
            client,
            tracker,
        }
    }

    pub async fn discover(&self) -> Result<Vec<PeerDescriptor>, ReplicationError> {
        self.link.list_available_peers().await
    }

    /// Link to `peer_name` and push a full snapshot to it.
    ///
    /// Success means the bytes were written, not that the peer applied them.
    pub async fn send_to_peer(&self, peer_name: &str) -> Result<SendReport, ReplicationError> {
        self.tracker.try_start_outbound(peer_name).await?;

        info!("Starting sync to {}", peer_name);
        let result = match self.link.connect(peer_name).await {
            Ok(endpoint) => self.client.send(endpoint).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(report) => {
                self.tracker
                    .finish_outbound(
                        peer_name,
                        TransferOutcome::written(report.bytes_written, report.rows),
                    )
                    .await;
                info!("Sync to {} written ({} bytes)", peer_name, report.bytes_written);
                Ok(report)
            }
            Err(e) => {
                error!("Sync to {} failed: {}", peer_name, e);
                self.tracker
                    .finish_outbound(peer_name, TransferOutcome::failed(0, &e))
                    .await;
                Err(e)
            }
        }
    }
}
