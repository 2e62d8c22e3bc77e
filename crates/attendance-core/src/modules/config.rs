//! Configuration persistence.
//!
//! The configuration lives in `config.json` inside the data directory
//! (`$ATTENDANCE_DATA_DIR`, or the platform data dir + `school-attendance`).

use std::fs;
use std::path::{Path, PathBuf};

use attendance_types::{AppConfig, ConfigError};

const CONFIG_FILE: &str = "config.json";
const DATA_DIR_ENV: &str = "ATTENDANCE_DATA_DIR";
const DATA_DIR_NAME: &str = "school-attendance";

/// Resolve (and create) the data directory.
pub fn get_data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => dirs::data_dir()
            .map(|base| base.join(DATA_DIR_NAME))
            .ok_or_else(|| ConfigError::NotFound { path: "<platform data dir>".to_string() })?,
    };
    fs::create_dir_all(&dir).map_err(|e| ConfigError::from_io_error(&e))?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(get_data_dir()?.join(CONFIG_FILE))
}

/// Load the application configuration, falling back to defaults when no file exists.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::new());
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
        message: format!("failed to read {}: {e}", path.display()),
    })?;
    let config: AppConfig =
        serde_json::from_str(&content).map_err(|e| ConfigError::from_json_error(&e))?;
    config.validate()?;
    Ok(config)
}

/// Validate and atomically write `config` to `path`.
pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    config.validate()?;
    let content =
        serde_json::to_string_pretty(config).map_err(|e| ConfigError::from_json_error(&e))?;

    // Atomic write
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, content).map_err(|e| ConfigError::from_io_error(&e))?;
    fs::rename(&temp_path, path).map_err(|e| ConfigError::from_io_error(&e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use attendance_types::models::LinkMode;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join(CONFIG_FILE)).unwrap();
        let defaults = AppConfig::new();
        assert_eq!(config.server, defaults.server);
        assert_eq!(config.link, defaults.link);
        assert_eq!(config.sync, defaults.sync);
        assert_eq!(config.devices.len(), defaults.devices.len());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let mut config = AppConfig::new();
        config.server.port = 9100;
        config.link.mode = LinkMode::Http;
        config.sync.auto_sync_interval_minutes = Some(15);
        save_config_to(&path, &config).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load_config_from(&path), Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_invalid_values_are_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{"sync":{"history_limit":0}}"#).unwrap();

        assert!(matches!(load_config_from(&path), Err(ConfigError::ValidationError { .. })));
    }
}
