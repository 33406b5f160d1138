//! Outbound side of a replication exchange.
//!
//! `send` is fire-and-forget: it reports that the snapshot bytes were written
//! and the connection closed, nothing more. The receiver never acknowledges,
//! so a successful send does not mean the peer applied anything.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpStream;
use tracing::{error, info, warn};

use super::transport;
use crate::errors::{ReplicationError, TransferError};
use crate::link::PeerEndpoint;
use crate::snapshot::exporter::UnreadableTable;
use crate::snapshot::{codec, SnapshotExporter};

/// What a send can vouch for: bytes handed to the connection
#[derive(Debug, Clone, Serialize)]
pub struct SendReport {
    pub peer: String,
    pub address: String,
    pub bytes_written: usize,
    pub tables: usize,
    pub rows: usize,
    /// Tables that could not be read and went out empty
    pub unreadable_tables: Vec<UnreadableTable>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

pub struct ReplicationClient {
    exporter: Arc<SnapshotExporter>,
}

impl ReplicationClient {
    pub fn new(exporter: Arc<SnapshotExporter>) -> Self {
        Self { exporter }
    }

    /// Push a fresh snapshot to `peer`. The endpoint is used up by the call.
    pub async fn send(&self, peer: PeerEndpoint) -> Result<SendReport, ReplicationError> {
        let started_at = Utc::now();
        let address = peer.address();
        info!("Connecting to {} at {}", peer.name(), address);

        let mut stream = TcpStream::connect(address).await.map_err(|e| {
            error!("Connection to {} ({}) failed: {}", peer.name(), address, e);
            TransferError::ConnectFailed {
                address: address.to_string(),
                reason: e.to_string(),
            }
        })?;

        let report = self.exporter.export_with_report().await;
        if !report.is_complete() {
            warn!(
                "Sending snapshot to {} with {} unreadable tables",
                peer.name(),
                report.unreadable_tables.len()
            );
        }

        let bytes = codec::encode(&report.snapshot)?;

        transport::write_message(&mut stream, &bytes)
            .await
            .map_err(|e| {
                error!("Write to {} ({}) failed: {}", peer.name(), address, e);
                TransferError::WriteFailed {
                    address: address.to_string(),
                    reason: e.to_string(),
                }
            })?;
        drop(stream);

        info!(
            "Wrote {} bytes ({} rows) to {}; receipt is not confirmed",
            bytes.len(),
            report.snapshot.row_count(),
            peer.name()
        );

        Ok(SendReport {
            peer: peer.name().to_string(),
            address: address.to_string(),
            bytes_written: bytes.len(),
            tables: report.snapshot.table_count(),
            rows: report.snapshot.row_count(),
            unreadable_tables: report.unreadable_tables,
            started_at,
            finished_at: Utc::now(),
        })
    }
}
