//! Application configuration.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::device::{default_devices, Device};
use crate::error::ConfigError;

/// Maximum absolute UTC offset accepted for attendance dates.
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Which device link implementation the registry talks through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkMode {
    /// Fixed-delay handshake without any network I/O
    #[default]
    Simulated,
    /// HTTP client against the device bridge
    Http,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8046 }
    }
}

impl ServerConfig {
    pub fn get_bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Device link settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LinkConfig {
    pub mode: LinkMode,
    /// Handshake delay of the simulated link
    pub connect_delay_ms: u64,
    /// Upper bound for any device handshake or feed request
    pub connect_timeout_secs: u64,
    /// Devices the simulated link can never reach
    pub unreachable_device_ids: Vec<String>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            mode: LinkMode::Simulated,
            connect_delay_ms: 2000,
            connect_timeout_secs: 10,
            unreachable_device_ids: vec!["BIO003".to_string()],
        }
    }
}

/// Reconciliation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SyncConfig {
    /// Number of sync results kept in memory
    pub history_limit: usize,
    /// Run `sync_all` periodically when set
    pub auto_sync_interval_minutes: Option<u64>,
    /// Offset used to derive attendance dates from event timestamps
    pub utc_offset_minutes: i32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { history_limit: 100, auto_sync_interval_minutes: None, utc_offset_minutes: 0 }
    }
}

/// Full application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    /// PostgreSQL URL; the in-memory ledger is used when absent
    pub database_url: Option<String>,
    pub link: LinkConfig,
    pub sync: SyncConfig,
    /// Devices registered at startup
    pub devices: Vec<Device>,
}

impl AppConfig {
    /// Create default configuration.
    pub fn new() -> Self {
        Self {
            server: ServerConfig::default(),
            database_url: None,
            link: LinkConfig::default(),
            sync: SyncConfig::default(),
            devices: default_devices(),
        }
    }

    /// Reject values the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::invalid("server.port", "port must be non-zero"));
        }
        if self.sync.history_limit == 0 {
            return Err(ConfigError::invalid("sync.history_limit", "must keep at least one result"));
        }
        if self.sync.auto_sync_interval_minutes == Some(0) {
            return Err(ConfigError::invalid(
                "sync.auto_sync_interval_minutes",
                "interval must be at least one minute",
            ));
        }
        if self.sync.utc_offset_minutes.unsigned_abs() > MAX_UTC_OFFSET_MINUTES.unsigned_abs() {
            return Err(ConfigError::invalid(
                "sync.utc_offset_minutes",
                format!("offset must be within ±{MAX_UTC_OFFSET_MINUTES} minutes"),
            ));
        }
        if self.link.connect_timeout_secs == 0 {
            return Err(ConfigError::invalid("link.connect_timeout_secs", "timeout must be non-zero"));
        }

        let mut seen = HashSet::new();
        for device in &self.devices {
            if !seen.insert(device.id.as_str()) {
                return Err(ConfigError::invalid(
                    "devices",
                    format!("duplicate device id {}", device.id),
                ));
            }
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
