//! School Attendance Server - Headless Daemon
//!
//! A pure Rust HTTP server that:
//! - Holds the biometric device registry
//! - Reconciles device events into the attendance ledger (on demand or on a schedule)
//! - Provides a REST API for dashboards and the CLI on /api/*
//!
//! Access via: http://localhost:8046

use anyhow::Result;
use clap::Parser;
use tracing::info;

mod api;
mod cli;
mod commands;
mod config_commands;
mod device_commands;
mod router;
mod scheduler;
mod server_utils;
mod state;

#[cfg(test)]
mod test_helpers;

use attendance_core::modules::{config as core_config, logger};
use attendance_types::AppConfig;
use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let Cli { command, port, log_level, database_url } = Cli::parse();
    let overrides = Overrides { port, database_url };

    let command = match command {
        None | Some(Commands::Serve) => {
            let data_dir = core_config::get_data_dir()?;
            let _log_guard = logger::init_logger(&log_level, Some(&data_dir.join("logs")))?;
            return run_server(overrides.apply(core_config::load_config()?)?).await;
        },
        Some(command) => command,
    };

    // Keep CLI output readable; RUST_LOG still wins when set.
    let _log_guard = logger::init_logger("warn", None)?;
    if let Commands::Config(cmd) = command {
        return commands::handle_config_command(cmd, &core_config::config_path()?);
    }

    let config = overrides.apply(core_config::load_config()?)?;
    match command {
        Commands::Devices(cmd) => commands::handle_device_command(cmd, &config).await,
        Commands::Sync { device, json } => commands::handle_sync(device, json, &config).await,
        Commands::Stats { date, json } => commands::handle_stats(date, json, &config).await,
        Commands::Config(_) | Commands::Serve => Ok(()),
    }
}

/// Command-line and environment values that take precedence over config.json.
struct Overrides {
    port: Option<u16>,
    database_url: Option<String>,
}

impl Overrides {
    fn apply(&self, mut config: AppConfig) -> Result<AppConfig> {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = &self.database_url {
            config.database_url = Some(url.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

async fn run_server(config: AppConfig) -> Result<()> {
    info!("🚀 School Attendance Server starting on {}...", config.server.get_bind_address());

    let state = AppState::from_config(config.clone()).await?;
    info!("✅ Application state initialized");
    info!("📟 {} devices registered", state.service().registry().len().await);

    let _scheduler = scheduler::start_auto_sync(state.clone());

    let listener = server_utils::create_listener(&config.server).await?;
    let local_addr = listener.local_addr()?;
    state.set_bound_port(local_addr.port());

    let app = router::build_router(state);

    info!("🌐 Server listening on http://{}", local_addr);
    info!("🔌 API available at http://{}/api/", local_addr);

    axum::serve(listener, app).with_graceful_shutdown(server_utils::shutdown_signal()).await?;

    info!("👋 Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_take_precedence() {
        let overrides =
            Overrides { port: Some(9100), database_url: Some("postgres://db/school".to_string()) };
        let config = overrides.apply(AppConfig::default()).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.database_url.as_deref(), Some("postgres://db/school"));
    }

    #[test]
    fn test_overrides_are_validated() {
        let overrides = Overrides { port: Some(0), database_url: None };
        assert!(overrides.apply(AppConfig::default()).is_err());
    }
}
