//! Transfer tracking for the UI
//!
//! Keeps track of outbound transfers currently running (one per peer) and a
//! bounded, in-memory history of finished transfers in both directions. Nothing
//! here is persisted: a restart forgets every past sync, and every sync is a
//! full resend anyway.
//!
//! # Usage
//!
//! ```ignore
//! let id = tracker.try_start_outbound("tablet-b").await?;
//! // send...
//! tracker.finish_outbound("tablet-b", TransferOutcome::written(bytes, rows)).await;
//! ```
//!
//! An outbound `Written` status only means the bytes left this device. The
//! receiver never reports back.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::constants::transfers::HISTORY_LIMIT;
use crate::errors::{ReplicationError, TransferError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferDirection {
    Outbound,
    Inbound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferStatus {
    /// Outbound bytes written and connection closed; receipt unknown
    Written,
    /// Inbound snapshot committed locally
    Applied,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActiveTransfer {
    pub id: Uuid,
    pub peer: String,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransferRecord {
    pub id: Uuid,
    pub direction: TransferDirection,
    pub peer: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub status: TransferStatus,
    pub bytes: usize,
    pub rows: usize,
    pub error_kind: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TransferOutcome {
    pub status: TransferStatus,
    pub bytes: usize,
    pub rows: usize,
    pub error_kind: Option<String>,
    pub error: Option<String>,
}

impl TransferOutcome {
    pub fn written(bytes: usize, rows: usize) -> Self {
        Self {
            status: TransferStatus::Written,
            bytes,
            rows,
            error_kind: None,
            error: None,
        }
    }

    pub fn applied(bytes: usize, rows: usize) -> Self {
        Self {
            status: TransferStatus::Applied,
            bytes,
            rows,
            error_kind: None,
            error: None,
        }
    }

    pub fn failed(bytes: usize, error: &ReplicationError) -> Self {
        Self {
            status: TransferStatus::Failed,
            bytes,
            rows: 0,
            error_kind: Some(error.kind().to_string()),
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransferOverview {
    pub active: HashMap<String, ActiveTransfer>,
    pub total_active: usize,
    pub recent: Vec<TransferRecord>,
}

pub struct TransferTracker {
    active_outbound: Arc<RwLock<HashMap<String, ActiveTransfer>>>, // peer -> transfer
    history: Arc<RwLock<VecDeque<TransferRecord>>>,
}

impl TransferTracker {
    pub fn new() -> Self {
        Self {
            active_outbound: Arc::new(RwLock::new(HashMap::new())),
            history: Arc::new(RwLock::new(VecDeque::new())),
        }
    }

    /// Reserve the peer for an outbound transfer
    /// Returns error if a transfer to this peer is already running
    #[instrument(skip(self), fields(peer = %peer))]
    pub async fn try_start_outbound(&self, peer: &str) -> Result<Uuid, ReplicationError> {
        let mut active = self.active_outbound.write().await;

        if let Some(current) = active.get(peer) {
            warn!(
                "Transfer {} to {} still running since {}",
                current.id, peer, current.started_at
            );
            return Err(TransferError::PeerBusy {
                peer_name: peer.to_string(),
            }
            .into());
        }

        let transfer = ActiveTransfer {
            id: Uuid::new_v4(),
            peer: peer.to_string(),
            started_at: Utc::now(),
        };
        let id = transfer.id;
        active.insert(peer.to_string(), transfer);
        info!("Started outbound transfer {} to {}", id, peer);
        Ok(id)
    }

    /// Release the peer and record how the transfer ended
    #[instrument(skip(self, outcome), fields(peer = %peer))]
    pub async fn finish_outbound(&self, peer: &str, outcome: TransferOutcome) {
        let removed = self.active_outbound.write().await.remove(peer);
        let Some(transfer) = removed else {
            warn!("No active outbound transfer to {} to finish", peer);
            return;
        };

        let record = TransferRecord {
            id: transfer.id,
            direction: TransferDirection::Outbound,
            peer: peer.to_string(),
            started_at: transfer.started_at,
            finished_at: Utc::now(),
            status: outcome.status,
            bytes: outcome.bytes,
            rows: outcome.rows,
            error_kind: outcome.error_kind,
            error: outcome.error,
        };
        self.push_history(record).await;
    }

    /// Record a finished inbound connection
    pub async fn record_inbound(
        &self,
        peer: &str,
        started_at: DateTime<Utc>,
        outcome: TransferOutcome,
    ) {
        let record = TransferRecord {
            id: Uuid::new_v4(),
            direction: TransferDirection::Inbound,
            peer: peer.to_string(),
            started_at,
            finished_at: Utc::now(),
            status: outcome.status,
            bytes: outcome.bytes,
            rows: outcome.rows,
            error_kind: outcome.error_kind,
            error: outcome.error,
        };
        self.push_history(record).await;
    }

    async fn push_history(&self, record: TransferRecord) {
        let mut history = self.history.write().await;
        history.push_front(record);
        history.truncate(HISTORY_LIMIT);
    }

    pub async fn is_busy(&self, peer: &str) -> bool {
        self.active_outbound.read().await.contains_key(peer)
    }

    pub async fn get_overview(&self) -> TransferOverview {
        let active = self.active_outbound.read().await.clone();
        let recent = self.history.read().await.iter().cloned().collect();
        TransferOverview {
            total_active: active.len(),
            active,
            recent,
        }
    }

    /// Drop outbound reservations older than `max_hours` (send never returned)
    pub async fn cleanup_stuck_transfers(&self, max_hours: i64) -> u32 {
        let mut active = self.active_outbound.write().await;
        let cutoff = Utc::now() - chrono::Duration::hours(max_hours);
        let initial_count = active.len();

        active.retain(|peer, transfer| {
            let keep = transfer.started_at > cutoff;
            if !keep {
                warn!(
                    "Dropping stuck transfer {} to {} (started {})",
                    transfer.id, peer, transfer.started_at
                );
            }
            keep
        });

        (initial_count - active.len()) as u32
    }
}

impl Default for TransferTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TransferTracker {
    fn clone(&self) -> Self {
        Self {
            active_outbound: self.active_outbound.clone(),
            history: self.history.clone(),
        }
    }
}
