pub mod config;
pub mod constants;
pub mod database;
pub mod errors;
pub mod link;
pub mod replication;
pub mod services;
pub mod snapshot;
pub mod transfer_tracker;
pub mod web;

// Re-export commonly used types
pub use config::{Config, ConfigManager, PeerConfig};
pub use database::Database;
pub use errors::ReplicationError;
pub use link::{PeerDescriptor, PeerEndpoint, PeerLink, StaticPeerLink};
pub use replication::{ReplicationClient, ReplicationListener, SendReport};
pub use services::SyncService;
pub use snapshot::{Row, Snapshot, SnapshotExporter, SnapshotImporter, Value};
pub use transfer_tracker::TransferTracker;
