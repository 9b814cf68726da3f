//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_POLL_INTERVAL_MS;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackletConfig {
    pub storage: StorageConfig,
    pub instance: InstanceConfig,
    pub api: ApiConfig,
}

/// Storage slot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the shared storage slots
    pub data_dir: String,
    /// Interval at which the slot watcher checks for foreign writes
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

/// Single-instance arbitration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceConfig {
    /// When true, a newly started context deactivates older ones
    pub single_instance: bool,
}

/// Remote collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the host application (project lookup, logbook)
    pub base_url: String,
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}
