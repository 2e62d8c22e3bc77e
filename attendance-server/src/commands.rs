use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use attendance_core::AttendanceService;
use attendance_types::AppConfig;

use crate::cli::{ConfigCommands, DeviceCommands};

mod device_commands_impl {
    pub use crate::device_commands::*;
}
mod config_commands_impl {
    pub use crate::config_commands::*;
}

pub async fn handle_device_command(cmd: DeviceCommands, config: &AppConfig) -> Result<()> {
    let service = AttendanceService::from_config(config).await?;
    match cmd {
        DeviceCommands::List { json } => device_commands_impl::list_devices(&service, json).await,
        DeviceCommands::Test { id } => device_commands_impl::test_device(&service, &id).await,
    }
}

/// One-shot commands without `database_url` write to a ledger that dies with the process.
fn ephemeral_ledger_warning(config: &AppConfig) -> Option<String> {
    config.database_url.is_none().then(|| {
        "No database_url configured: using an in-memory ledger, \
         results are discarded when this command exits"
            .to_string()
    })
}

fn warn_if_ephemeral(config: &AppConfig) {
    if let Some(warning) = ephemeral_ledger_warning(config) {
        eprintln!("{} {}", "⚠".yellow(), warning.yellow());
    }
}

pub async fn handle_sync(device: Option<String>, json: bool, config: &AppConfig) -> Result<()> {
    warn_if_ephemeral(config);
    let service = AttendanceService::from_config(config).await?;
    device_commands_impl::sync(&service, device.as_deref(), json).await
}

pub async fn handle_stats(
    date: Option<chrono::NaiveDate>,
    json: bool,
    config: &AppConfig,
) -> Result<()> {
    warn_if_ephemeral(config);
    let service = AttendanceService::from_config(config).await?;
    device_commands_impl::stats(&service, date, json).await
}

pub fn handle_config_command(cmd: ConfigCommands, config_path: &Path) -> Result<()> {
    match cmd {
        ConfigCommands::Show { json } => config_commands_impl::show_config(config_path, json),
        ConfigCommands::Path => {
            println!("{}", config_path.display());
            Ok(())
        },
        ConfigCommands::Init { force } => config_commands_impl::init_config(config_path, force),
    }
}
