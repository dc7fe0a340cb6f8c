mod args;
mod card;
mod config;
mod plain;
mod tui;

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use args::Args;
use plain::PlainOptions;
use scanhist_client::HttpPageSource;
use tui::{AppSettings, SharedSource};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // get_matches() keeps the ArgMatches around for config merging
    let matches = Args::command().get_matches();
    let mut args = Args::from_arg_matches(&matches)?;

    let file_config = config::load_for_args(args.config.as_deref())?;
    if let Some(ref file_config) = file_config {
        config::apply_config_with_matches(file_config, &mut args, &matches);
    }

    init_tracing(&args);
    if file_config.is_some() {
        info!(path = ?args.config, "applied config file");
    }
    debug!(?args, "starting");

    let client_config = config::client_config(&args);
    let source = HttpPageSource::new(client_config)
        .with_context(|| format!("invalid --api-url '{}'", args.api_url))?;
    info!(endpoint = %source.endpoint(), "scan source ready");

    if args.plain {
        let options = PlainOptions {
            max_pages: args.max_pages,
            json: args.json,
        };
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        return match plain::run_plain(&source, options, &mut out).await {
            Ok(_) => {
                out.flush()?;
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                out.flush()?;
                eprintln!("{e:#}");
                Ok(ExitCode::FAILURE)
            }
        };
    }

    let source: SharedSource = Arc::new(source);
    tui::run_tui(
        source,
        AppSettings {
            placeholders: args.placeholders,
            theme: args.theme,
            api_url: args.api_url.clone(),
        },
    )
    .await?;
    Ok(ExitCode::SUCCESS)
}

/// Log to stderr. The interactive view owns the terminal, so it stays
/// silent unless `RUST_LOG` asks otherwise.
fn init_tracing(args: &Args) {
    let filter = if !args.plain {
        "off"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();
}
