use std::path::PathBuf;

use clap::Parser;

use crate::tui::theme::ThemeMode;

/// Default number of skeleton cards shown while a page loads.
pub const DEFAULT_PLACEHOLDERS: usize = scanhist_core::DEFAULT_PLACEHOLDERS;

#[derive(Parser, Debug, Clone)]
#[command(name = "scanhist", version, about = "Browse paginated scan history")]
pub struct Args {
    /// Base URL of the scan API (the client requests <URL>/api/scans)
    #[arg(long = "api-url", value_name = "URL", default_value = scanhist_client::DEFAULT_API_URL)]
    pub api_url: String,

    /// Request timeout in milliseconds
    #[arg(long = "timeout", value_name = "MS", default_value = "10000", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: u64,

    /// Page size hint sent to the server as `limit`
    #[arg(long = "page-size", value_name = "N")]
    pub page_size: Option<usize>,

    /// Skeleton cards shown while a page is loading
    #[arg(long = "placeholders", value_name = "N", default_value_t = DEFAULT_PLACEHOLDERS)]
    pub placeholders: usize,

    /// Color theme (toggle at runtime with `t`)
    #[arg(long = "theme", value_enum, default_value_t = ThemeMode::Dark)]
    pub theme: ThemeMode,

    /// Config file (default: ~/.scanhist/config.toml)
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (use -v or -vv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    // --- Non-interactive output ---
    /// Print scans to stdout instead of opening the interactive view
    #[arg(long = "plain")]
    pub plain: bool,

    /// Stop after this many pages (plain mode)
    #[arg(long = "max-pages", value_name = "N", requires = "plain", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_pages: Option<u64>,

    /// Emit one JSON object per scan (plain mode)
    #[arg(long = "json", requires = "plain")]
    pub json: bool,
}
