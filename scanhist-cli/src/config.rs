use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use clap::parser::ValueSource;
use serde::{Deserialize, Serialize};

use scanhist_client::ClientConfig;

use crate::args::Args;
use crate::tui::theme::ThemeMode;

/// Settings read from the TOML config file.
///
/// All fields are optional. A value is applied only if the matching flag
/// was not given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholders: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeMode>,
}

pub fn default_config_path() -> PathBuf {
    if cfg!(windows) {
        let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(appdata).join("scanhist").join("config.toml")
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".scanhist").join("config.toml")
    }
}

pub fn load_config(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config '{}'", path.display()))?;
    let config: FileConfig = toml::from_str(&content)
        .with_context(|| format!("failed to parse config '{}'", path.display()))?;
    if config.timeout_ms == Some(0) {
        bail!("invalid config '{}': timeout_ms must be at least 1", path.display());
    }
    Ok(config)
}

/// Resolve the config to use. An explicit `--config` path must exist; the
/// default location is optional.
pub fn load_for_args(explicit: Option<&Path>) -> Result<Option<FileConfig>> {
    match explicit {
        Some(path) => load_config(path).map(Some),
        None => {
            let path = default_config_path();
            if path.exists() {
                load_config(&path).map(Some)
            } else {
                Ok(None)
            }
        }
    }
}

/// Overlay config values onto `args` wherever the user did not pass the
/// flag explicitly.
pub fn apply_config_with_matches(config: &FileConfig, args: &mut Args, matches: &ArgMatches) {
    let not_set = |id: &str| -> bool {
        matches
            .value_source(id)
            .is_none_or(|s| s != ValueSource::CommandLine)
    };

    if let Some(ref v) = config.api_url
        && not_set("api_url")
    {
        args.api_url = v.clone();
    }
    if let Some(v) = config.timeout_ms
        && not_set("timeout_ms")
    {
        args.timeout_ms = v;
    }
    if let Some(v) = config.page_size
        && not_set("page_size")
    {
        args.page_size = Some(v);
    }
    if let Some(v) = config.placeholders
        && not_set("placeholders")
    {
        args.placeholders = v;
    }
    if let Some(v) = config.theme
        && not_set("theme")
    {
        args.theme = v;
    }
}

pub fn client_config(args: &Args) -> ClientConfig {
    ClientConfig {
        base_url: args.api_url.clone(),
        timeout: Duration::from_millis(args.timeout_ms),
        page_size: args.page_size,
    }
}
