//! Peer discovery and link establishment
//!
//! The link service finds nearby devices and, given a choice, sets up a direct
//! link and hands back the peer's replication address. The radio-level
//! negotiation is not part of this crate; `PeerLink` is the seam where a
//! platform implementation plugs in. `StaticPeerLink` serves peers listed in
//! the configuration directory.

pub mod static_peers;

pub use static_peers::StaticPeerLink;

use async_trait::async_trait;
use serde::Serialize;
use std::net::SocketAddr;

use crate::errors::ReplicationError;

/// A device the link service can see
#[derive(Debug, Clone, Serialize)]
pub struct PeerDescriptor {
    pub name: String,
    pub host: String,
    pub port: u16,
    pub description: Option<String>,
}

/// Address of a peer's replication listener.
///
/// Produced by `PeerLink::connect` and consumed by exactly one
/// `ReplicationClient::send`, so it is not `Clone`.
#[derive(Debug)]
pub struct PeerEndpoint {
    name: String,
    address: SocketAddr,
}

impl PeerEndpoint {
    pub fn new(name: impl Into<String>, address: SocketAddr) -> Self {
        Self {
            name: name.into(),
            address,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> SocketAddr {
        self.address
    }
}

#[async_trait]
pub trait PeerLink: Send + Sync {
    /// Enumerate peers currently reachable over the local link
    async fn list_available_peers(&self) -> Result<Vec<PeerDescriptor>, ReplicationError>;

    /// Establish a link to `peer_name` and return its replication endpoint
    async fn connect(&self, peer_name: &str) -> Result<PeerEndpoint, ReplicationError>;
}
