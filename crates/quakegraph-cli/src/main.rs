//! Batch command-line driver for the Quakegraph pipeline.
//!
//! Reads a GeoJSON feature collection of seismic events, derives
//! per-country counts and a similarity graph around significant
//! earthquakes, and writes two artifacts for the dashboard:
//!
//! ```text
//! map.geojson --> decode --> classify --> aggregate + relate --> earthquake_analysis.json
//!                                     \----------------------> processed_map.geojson
//! ```
//!
//! # Startup Sequence
//!
//! 1. Parse arguments
//! 2. Load configuration (`--config`, else `quakegraph.yaml` if present)
//! 3. Initialize structured logging (tracing)
//! 4. Dispatch the subcommand

mod cli;
mod commands;
mod error;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quakegraph_analysis::QuakegraphConfig;
use quakegraph_analysis::config::{LogFormat, LoggingConfig};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Configuration file picked up from the working directory.
const DEFAULT_CONFIG_FILE: &str = "quakegraph.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, input decoding, analysis, or any
/// write fails. Nothing is written unless decoding and analysis succeed.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_logging(&config.logging)?;
    info!("quakegraph starting");

    match &cli.command {
        Command::Analyze(args) => {
            commands::analyze(args, &config).with_context(|| {
                format!("analysis of {} failed", args.selection.input.display())
            })?;
        }
        Command::DepthSeries(args) => {
            let mut stdout = std::io::stdout().lock();
            commands::depth_series(args, &config, &mut stdout).with_context(|| {
                format!("depth series for {} failed", args.country)
            })?;
        }
        Command::Network(args) => {
            let mut stdout = std::io::stdout().lock();
            commands::network(args, &config, &mut stdout)
                .with_context(|| format!("network for {} failed", args.id))?;
        }
    }

    Ok(())
}

/// Load configuration from an explicit path, the default file, or defaults.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<QuakegraphConfig> {
    let path = explicit.map(Path::to_path_buf).or_else(|| {
        let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
        fallback.exists().then_some(fallback)
    });

    let config = match path {
        Some(path) => QuakegraphConfig::from_file(&path)
            .map_err(CliError::from)
            .with_context(|| format!("loading {}", path.display()))?,
        None => {
            let mut config = QuakegraphConfig::default();
            config.apply_env_overrides();
            config
        }
    };
    Ok(config)
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level.
fn init_logging(logging: &LoggingConfig) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .map_err(|e| CliError::Logging {
            message: format!("invalid log level '{}': {e}", logging.level),
        })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    let installed = match logging.format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| CliError::Logging {
        message: e.to_string(),
    })
}
