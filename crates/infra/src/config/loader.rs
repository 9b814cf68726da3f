//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `TRACKLET_DATA_DIR`: Directory holding the shared storage slots
//! - `TRACKLET_POLL_INTERVAL_MS`: Watcher poll interval (optional)
//! - `TRACKLET_SINGLE_INSTANCE`: Whether a new context deactivates older
//!   ones (true/false, default true)
//! - `TRACKLET_API_BASE_URL`: Base URL of the host application
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./tracklet.json` or `./tracklet.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use tracklet_domain::constants::DEFAULT_POLL_INTERVAL_MS;
use tracklet_domain::{
    ApiConfig, InstanceConfig, Result, StorageConfig, TrackletConfig, TrackletError,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `TrackletError::Config` if configuration cannot be loaded from
/// either source, the file format is invalid, or required fields are
/// missing.
pub fn load() -> Result<TrackletConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `TrackletError::Config` if required variables are missing or
/// have invalid values.
pub fn load_from_env() -> Result<TrackletConfig> {
    let data_dir = env_var("TRACKLET_DATA_DIR")?;
    let poll_interval_ms = match std::env::var("TRACKLET_POLL_INTERVAL_MS") {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|e| TrackletError::Config(format!("Invalid poll interval: {e}")))?,
        Err(_) => DEFAULT_POLL_INTERVAL_MS,
    };
    let single_instance = env_bool("TRACKLET_SINGLE_INSTANCE", true);
    let base_url = env_var("TRACKLET_API_BASE_URL")?;

    Ok(TrackletConfig {
        storage: StorageConfig { data_dir, poll_interval_ms },
        instance: InstanceConfig { single_instance },
        api: ApiConfig { base_url },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `TrackletError::Config` if no file is found, the format is
/// invalid, or required fields are missing.
pub fn load_from_file(path: Option<PathBuf>) -> Result<TrackletConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(TrackletError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            TrackletError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| TrackletError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<TrackletConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| TrackletError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| TrackletError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(TrackletError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("tracklet.json"),
            cwd.join("tracklet.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
        ]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("tracklet.json"),
                exe_dir.join("tracklet.toml"),
            ]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| TrackletError::Config(format!("Missing required environment variable: {key}")))
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off`
/// (case-insensitive); `default` applies when the variable is not set.
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
