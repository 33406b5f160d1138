// File: src/config/mod.rs
pub mod manager;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
pub use manager::ConfigManager;

use crate::constants::{control, replication};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub device_name: String,
    #[serde(default = "default_listen_host")]
    pub listen_host: String,
    #[serde(default = "default_replication_port")]
    pub replication_port: u16,
    #[serde(default = "default_control_host")]
    pub control_host: String,
    #[serde(default = "default_control_port")]
    pub control_port: u16,
    #[serde(default = "default_database_path")]
    pub database_path: String,
    // Populated from config/peers/*.toml
    #[serde(skip)]
    pub peers: HashMap<String, PeerConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerConfig {
    pub host: String,
    #[serde(default = "default_replication_port")]
    pub port: u16,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub description: Option<String>,
}

impl Config {
    pub fn replication_addr(&self) -> String {
        format!("{}:{}", self.listen_host, self.replication_port)
    }

    pub fn control_addr(&self) -> String {
        format!("{}:{}", self.control_host, self.control_port)
    }
}

fn default_listen_host() -> String {
    "0.0.0.0".to_string()
}

fn default_replication_port() -> u16 {
    replication::DEFAULT_PORT
}

fn default_control_host() -> String {
    control::DEFAULT_HOST.to_string()
}

fn default_control_port() -> u16 {
    control::DEFAULT_PORT
}

fn default_database_path() -> String {
    "data/records.db".to_string()
}

fn default_enabled() -> bool {
    true
}
