use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "attendance",
    about = "School Attendance Server - biometric device sync daemon",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Overrides `server.port` from config.json
    #[arg(short, long, global = true, env = "ATTENDANCE_PORT")]
    pub port: Option<u16>,

    #[arg(short, long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Overrides `database_url` from config.json
    #[arg(long, global = true, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Start the HTTP server (default if no command specified)")]
    Serve,

    #[command(subcommand, about = "Inspect biometric devices")]
    Devices(DeviceCommands),

    #[command(about = "Pull events from devices into the attendance ledger")]
    Sync {
        #[arg(short, long, help = "Sync a single device instead of all active ones")]
        device: Option<String>,

        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Show daily attendance statistics")]
    Stats {
        #[arg(short, long, help = "Date as YYYY-MM-DD (defaults to today)")]
        date: Option<chrono::NaiveDate>,

        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(subcommand, about = "View or create configuration")]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum DeviceCommands {
    #[command(about = "List registered devices")]
    List {
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Probe a device without changing its state")]
    Test {
        #[arg(help = "Device ID (e.g. BIO001)")]
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    #[command(about = "Show current configuration")]
    Show {
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Print the config.json location")]
    Path,

    #[command(about = "Write a default config.json to edit")]
    Init {
        #[arg(long, help = "Overwrite an existing config.json")]
        force: bool,
    },
}
