// File: src/config/manager.rs
use super::{Config, PeerConfig};
use crate::errors::ConfigError;
use anyhow::{anyhow, Result};
use glob::glob;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

pub struct ConfigManager {
    current_config: Arc<Config>,
}

impl ConfigManager {
    pub async fn new(config_dir: String) -> Result<Self> {
        let config = Self::load_configuration(&config_dir).await?;
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    async fn load_configuration(config_dir: &str) -> Result<Config> {
        let main_config_path = format!("{}/main.toml", config_dir);
        let main_config_content =
            fs::read_to_string(&main_config_path)
                .await
                .map_err(|e| ConfigError::LoadFailed {
                    path: main_config_path.clone(),
                    reason: e.to_string(),
                })?;

        let mut config: Config =
            toml::from_str(&main_config_content).map_err(|e| ConfigError::LoadFailed {
                path: main_config_path.clone(),
                reason: e.to_string(),
            })?;

        // One file per known peer, named after the peer
        let pattern = format!("{}/peers/*.toml", config_dir);
        let mut peers = HashMap::new();

        for entry in glob(&pattern).map_err(|e| anyhow!("Glob pattern error: {}", e))? {
            let path = entry.map_err(|e| anyhow!("Glob entry error: {}", e))?;
            let peer_name = path
                .file_stem()
                .and_then(|name| name.to_str())
                .ok_or_else(|| anyhow!("Invalid peer config filename: {}", path.display()))?
                .to_string();

            debug!("Loading peer config: {}", path.display());

            let content = fs::read_to_string(&path)
                .await
                .map_err(|e| ConfigError::LoadFailed {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;

            let peer: PeerConfig = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

            peers.insert(peer_name, peer);
        }

        config.peers = peers;
        Self::validate(&config)?;

        info!(
            "Loaded configuration for {} with {} peers",
            config.device_name,
            config.peers.len()
        );

        Ok(config)
    }

    fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.device_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "device_name".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if config.replication_port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "replication_port".to_string(),
                reason: "must be a fixed, non-zero port".to_string(),
            });
        }
        if config.listen_host == config.control_host
            && config.replication_port == config.control_port
        {
            return Err(ConfigError::InvalidValue {
                field: "control_port".to_string(),
                reason: "collides with replication_port".to_string(),
            });
        }
        for (name, peer) in &config.peers {
            if peer.host.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("peers.{}.host", name),
                    reason: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}
