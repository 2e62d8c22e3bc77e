use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use attendance_core::modules::config as core_config;
use attendance_types::AppConfig;

pub fn show_config(path: &Path, json: bool) -> Result<()> {
    let config = core_config::load_config_from(path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print!("{}", render_config(&config));
    }
    Ok(())
}

pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    core_config::save_config_to(path, &AppConfig::default())?;
    println!("{} Wrote default config to {}", "✓".green(), path.display());
    Ok(())
}

pub(crate) fn render_config(config: &AppConfig) -> String {
    let mut out = String::new();
    let mut line = |s: String| {
        out.push_str(&s);
        out.push('\n');
    };

    line(format!("{}", "Server:".cyan().bold()));
    line(format!("  Bind: {}", config.server.get_bind_address()));
    line(format!("  Database: {}", mask_url(config.database_url.as_deref())));
    line(format!("{}", "Device Link:".cyan().bold()));
    line(format!("  Mode: {:?}", config.link.mode));
    line(format!("  Connect timeout: {}s", config.link.connect_timeout_secs));
    line(format!("{}", "Sync:".cyan().bold()));
    line(format!("  History limit: {}", config.sync.history_limit));
    line(format!(
        "  Auto sync: {}",
        config
            .sync
            .auto_sync_interval_minutes
            .map_or_else(|| "off".to_string(), |m| format!("every {m}min"))
    ));
    line(format!("  UTC offset: {}min", config.sync.utc_offset_minutes));
    line(format!("  Devices: {}", config.devices.len()));
    out
}

/// Hide credentials in a database URL.
fn mask_url(url: Option<&str>) -> String {
    let Some(url) = url else {
        return "in-memory".to_string();
    };
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &url[..scheme_end], &url[at..])
        },
        _ => url.to_string(),
    }
}
