// File: src/link/static_peers.rs
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::net::lookup_host;
use tracing::{debug, info, warn};

use super::{PeerDescriptor, PeerEndpoint, PeerLink};
use crate::config::PeerConfig;
use crate::errors::{LinkError, ReplicationError};

/// Link service over a fixed list of configured peers
pub struct StaticPeerLink {
    peers: HashMap<String, PeerConfig>,
}

impl StaticPeerLink {
    pub fn new(peers: HashMap<String, PeerConfig>) -> Self {
        Self { peers }
    }
}

#[async_trait]
impl PeerLink for StaticPeerLink {
    async fn list_available_peers(&self) -> Result<Vec<PeerDescriptor>, ReplicationError> {
        let mut peers: Vec<PeerDescriptor> = self
            .peers
            .iter()
            .filter(|(_, peer)| peer.enabled)
            .map(|(name, peer)| PeerDescriptor {
                name: name.clone(),
                host: peer.host.clone(),
                port: peer.port,
                description: peer.description.clone(),
            })
            .collect();
        peers.sort_by(|a, b| a.name.cmp(&b.name));

        debug!("{} peers available", peers.len());
        Ok(peers)
    }

    async fn connect(&self, peer_name: &str) -> Result<PeerEndpoint, ReplicationError> {
        let peer = self.peers.get(peer_name).ok_or_else(|| LinkError::UnknownPeer {
            peer_name: peer_name.to_string(),
        })?;

        if !peer.enabled {
            warn!("Refusing link to disabled peer {}", peer_name);
            return Err(LinkError::PeerDisabled {
                peer_name: peer_name.to_string(),
            }
            .into());
        }

        let address = format!("{}:{}", peer.host, peer.port);
        let resolved = lookup_host(&address)
            .await
            .map_err(|e| LinkError::ResolveFailed {
                address: address.clone(),
                reason: e.to_string(),
            })?
            .next()
            .ok_or_else(|| LinkError::ResolveFailed {
                address: address.clone(),
                reason: "no addresses returned".to_string(),
            })?;

        info!("Link to {} established at {}", peer_name, resolved);
        Ok(PeerEndpoint::new(peer_name, resolved))
    }
}
