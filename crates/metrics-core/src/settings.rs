use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Terminal dashboard for Copilot usage-metric exports
#[derive(Parser, Debug, Clone)]
#[command(
    name = "copilot-metrics",
    about = "Terminal dashboard for Copilot usage-metric exports",
    version
)]
pub struct Settings {
    /// NDJSON metrics file to load on startup
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Initial view
    #[arg(long, default_value = "users", value_parser = [
        "users", "daily", "features", "ides", "languages", "global",
    ])]
    pub view: String,

    /// Display theme
    #[arg(long, default_value = "dark", value_parser = ["light", "dark"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Clear the cached session data and exit
    #[arg(long)]
    pub clear: bool,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
