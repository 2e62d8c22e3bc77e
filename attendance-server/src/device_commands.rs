use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};

use attendance_core::AttendanceService;
use attendance_types::{DailyStats, Device, SyncResult};

pub async fn list_devices(service: &AttendanceService, json: bool) -> Result<()> {
    let devices = service.list_devices().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&devices)?);
        return Ok(());
    }

    if devices.is_empty() {
        println!("{}", "No devices registered.".yellow());
        return Ok(());
    }

    println!("{}", devices_table(&devices));
    let active = devices.iter().filter(|d| d.is_active).count();
    println!("\n{} devices total, {} active", devices.len(), active);
    Ok(())
}

pub async fn test_device(service: &AttendanceService, id: &str) -> Result<()> {
    // Surface NotFound instead of a bare "unreachable"
    let device = service.get_device(id).await?;

    println!("{}", format!("Probing {} at {}...", device.name, device.address()).cyan());
    if service.test_connection(id).await {
        println!("{} {} is reachable", "✓".green(), id.green());
    } else {
        println!("{} {} is unreachable", "✗".red(), id.red());
    }
    Ok(())
}

pub async fn sync(service: &AttendanceService, device: Option<&str>, json: bool) -> Result<()> {
    let results = match device {
        Some(id) => vec![service.sync_one(id).await?],
        None => service.sync_all().await,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("{}", "No active devices to sync.".yellow());
        return Ok(());
    }

    println!("{}", sync_table(&results));
    for result in &results {
        for error in &result.errors {
            println!("  {} {}: {}", "!".yellow(), result.device_id, error);
        }
    }
    Ok(())
}

pub async fn stats(service: &AttendanceService, date: Option<NaiveDate>, json: bool) -> Result<()> {
    let date = date.unwrap_or_else(|| service.today());
    let stats = service.daily_stats(date).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", format!("Attendance for {}", stats.date).cyan().bold());
    println!("{}", stats_table(&stats));
    Ok(())
}

pub(crate) fn devices_table(devices: &[Device]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Name", "Location", "Type", "Address", "Last Sync", "Status"]);

    for device in devices {
        let status = if device.is_active {
            Cell::new("Active").fg(Color::Green)
        } else {
            Cell::new("Inactive").fg(Color::Red)
        };
        let last_sync = device
            .last_sync
            .map_or_else(|| "never".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string());

        table.add_row(vec![
            Cell::new(&device.id),
            Cell::new(&device.name),
            Cell::new(&device.location),
            Cell::new(device.biometric_type.to_string()),
            Cell::new(device.address()),
            Cell::new(last_sync),
            status,
        ]);
    }
    table
}

pub(crate) fn sync_table(results: &[SyncResult]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Device", "Result", "Processed", "Added", "Updated", "Errors"]);

    for result in results {
        let outcome = if result.success {
            Cell::new("OK").fg(Color::Green)
        } else {
            Cell::new("Failed").fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(format!("{} ({})", result.device_name, result.device_id)),
            outcome,
            Cell::new(result.records_processed),
            Cell::new(result.records_added),
            Cell::new(result.records_updated),
            Cell::new(result.errors.len()),
        ]);
    }
    table
}

pub(crate) fn stats_table(stats: &DailyStats) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Group", "Present", "Total", "Rate"]);

    for (label, kind) in [("Students", &stats.students), ("Teachers", &stats.teachers)] {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(kind.present),
            Cell::new(kind.total),
            Cell::new(format!("{:.1}%", kind.percentage)),
        ]);
    }
    table
}
