use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "greenhouse-panel")]
#[command(about = "Greenhouse monitoring panel with simulated sensors")]
pub struct CliConfig {
    /// Path to the JSON or TOML configuration file
    #[arg(short, long, default_value = "config.json")]
    pub config: String,

    /// Override the monitoring tick period in milliseconds
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// Disable the periodic alert check
    #[arg(long)]
    pub no_monitor: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
