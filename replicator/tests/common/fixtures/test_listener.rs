//! A receiving device: datastore plus a listener on an ephemeral port

use replicator::transfer_tracker::{TransferDirection, TransferRecord};
use replicator::{ReplicationListener, TransferTracker};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::TestDatastore;

pub struct TestListener {
    pub store: TestDatastore,
    pub listener: Arc<ReplicationListener>,
    pub tracker: Arc<TransferTracker>,
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl TestListener {
    pub async fn start() -> anyhow::Result<Self> {
        let store = TestDatastore::new().await?;
        let tracker = Arc::new(TransferTracker::new());
        let listener = Arc::new(ReplicationListener::new(
            Arc::new(store.importer()),
            tracker.clone(),
        ));

        let tcp_listener = ReplicationListener::bind("127.0.0.1:0").await?;
        let addr = tcp_listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(listener.clone().serve_with_shutdown(tcp_listener, async move {
            let _ = shutdown_rx.await;
        }));

        Ok(Self {
            store,
            listener,
            tracker,
            addr,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        })
    }

    /// Wait until `count` inbound connections have finished, newest first
    pub async fn wait_for_inbound(&self, count: usize) -> Vec<TransferRecord> {
        let poll = async {
            loop {
                let inbound: Vec<TransferRecord> = self
                    .tracker
                    .get_overview()
                    .await
                    .recent
                    .into_iter()
                    .filter(|r| r.direction == TransferDirection::Inbound)
                    .collect();
                if inbound.len() >= count {
                    return inbound;
                }
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        };

        tokio::time::timeout(Duration::from_secs(10), poll)
            .await
            .expect("inbound connections did not finish in time")
    }

    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}
