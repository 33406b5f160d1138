//! Inbound side of a replication exchange.
//!
//! Binds the replication port and handles every accepted connection in its
//! own task. A connection's bytes are gathered into a buffer owned by that
//! task until the sender half-closes, then decoded and imported. Failures are
//! logged and end with the connection; the sender is never told.

use anyhow::Result;
use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncRead;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use super::transport;
use crate::errors::{ReplicationError, TransferError};
use crate::snapshot::{codec, ImportSummary, SnapshotImporter};
use crate::transfer_tracker::{TransferOutcome, TransferTracker};

pub struct ReplicationListener {
    importer: Arc<SnapshotImporter>,
    tracker: Arc<TransferTracker>,
}

impl ReplicationListener {
    pub fn new(importer: Arc<SnapshotImporter>, tracker: Arc<TransferTracker>) -> Self {
        Self { importer, tracker }
    }

    pub async fn bind(listen_addr: &str) -> Result<TcpListener> {
        let listener = TcpListener::bind(listen_addr).await?;
        info!("Replication listener bound on {}", listen_addr);
        Ok(listener)
    }

    /// Accept connections until the task is dropped or aborted
    pub async fn serve(self: Arc<Self>, listener: TcpListener) {
        self.serve_with_shutdown(listener, std::future::pending())
            .await
    }

    /// Accept connections until `shutdown` resolves.
    ///
    /// Connections already accepted keep running in their own tasks.
    pub async fn serve_with_shutdown<F>(self: Arc<Self>, listener: TcpListener, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Replication listener stopping");
                    break;
                }
                accepted = listener.accept() => match accepted {
                    Ok((stream, addr)) => {
                        debug!("Accepted replication connection from {}", addr);
                        let handler = self.clone();
                        tokio::spawn(async move {
                            let mut stream = stream;
                            // Outcome is already logged and recorded
                            let _ = handler.handle_connection(&mut stream, &addr.to_string()).await;
                        });
                    }
                    Err(e) => {
                        warn!("Failed to accept replication connection: {}", e);
                        tokio::time::sleep(Duration::from_millis(100)).await;
                    }
                }
            }
        }
    }

    /// Receive one message from `stream`, decode it and import it.
    pub async fn handle_connection<S>(
        &self,
        stream: &mut S,
        peer: &str,
    ) -> Result<ImportSummary, ReplicationError>
    where
        S: AsyncRead + Unpin,
    {
        let started_at = Utc::now();

        let bytes = match transport::read_message(stream).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Connection from {} aborted: {}", peer, e);
                let err: ReplicationError = TransferError::ReadFailed {
                    address: peer.to_string(),
                    reason: e.to_string(),
                }
                .into();
                self.tracker
                    .record_inbound(peer, started_at, TransferOutcome::failed(0, &err))
                    .await;
                return Err(err);
            }
        };
        debug!("Received {} bytes from {}", bytes.len(), peer);

        let snapshot = match codec::decode(&bytes) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                error!("Discarding data from {}: {}", peer, err);
                self.tracker
                    .record_inbound(peer, started_at, TransferOutcome::failed(bytes.len(), &err))
                    .await;
                return Err(err);
            }
        };

        match self.importer.import(&snapshot).await {
            Ok(summary) => {
                info!(
                    "Applied snapshot from {}: {} rows",
                    peer,
                    summary.rows_applied()
                );
                self.tracker
                    .record_inbound(
                        peer,
                        started_at,
                        TransferOutcome::applied(bytes.len(), summary.rows_applied()),
                    )
                    .await;
                Ok(summary)
            }
            Err(err) => {
                error!("Snapshot from {} was not applied: {}", peer, err);
                self.tracker
                    .record_inbound(peer, started_at, TransferOutcome::failed(bytes.len(), &err))
                    .await;
                Err(err)
            }
        }
    }
}
