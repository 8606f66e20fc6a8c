//! Command-line arguments.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use quakegraph_analysis::DatePreset;
use quakegraph_types::MagnitudeLevel;

/// Seismic event analysis: country counts and a similarity graph.
#[derive(Debug, Parser)]
#[command(name = "quakegraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file. Defaults to `quakegraph.yaml` when present.
    #[arg(short, long, global = true, env = "QUAKEGRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a GeoJSON feature collection and write both artifacts.
    Analyze(AnalyzeArgs),

    /// Print the depth/time series for one country as JSON.
    DepthSeries(DepthSeriesArgs),

    /// Print the relationship network around one significant event as JSON.
    Network(NetworkArgs),
}

/// Selection flags shared by every subcommand.
#[derive(Debug, Args)]
pub struct SelectionArgs {
    /// Input GeoJSON feature collection.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Keep only events at this magnitude level (moderate, strong, major, great).
    #[arg(long)]
    pub level: Option<MagnitudeLevel>,

    /// Keep only events at or after this instant (RFC 3339).
    #[arg(long, conflicts_with = "last")]
    pub start: Option<DateTime<Utc>>,

    /// Keep only events at or before this instant (RFC 3339).
    #[arg(long, conflicts_with = "last")]
    pub end: Option<DateTime<Utc>>,

    /// Keep only events inside a window ending now.
    #[arg(long, value_enum)]
    pub last: Option<Window>,

    /// Scan significant events in parallel.
    #[arg(long)]
    pub parallel: bool,
}

/// Arguments for `analyze`.
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Event selection.
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Directory for both artifacts (overrides config and environment).
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Indent the written JSON.
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments for `depth-series`.
#[derive(Debug, Args)]
pub struct DepthSeriesArgs {
    /// Event selection.
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Country key; `Unknown` merges every country.
    #[arg(long)]
    pub country: String,
}

/// Arguments for `network`.
#[derive(Debug, Args)]
pub struct NetworkArgs {
    /// Event selection.
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Id of the significant event at the center.
    #[arg(long)]
    pub id: String,
}

/// Relative date windows for `--last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Window {
    /// 7 days.
    Week,
    /// 30 days.
    Month,
    /// 90 days.
    #[value(name = "3months")]
    ThreeMonths,
    /// 180 days.
    #[value(name = "6months")]
    SixMonths,
    /// 365 days.
    Year,
}

impl From<Window> for DatePreset {
    fn from(window: Window) -> Self {
        match window {
            Window::Week => Self::LastWeek,
            Window::Month => Self::LastMonth,
            Window::ThreeMonths => Self::Last3Months,
            Window::SixMonths => Self::Last6Months,
            Window::Year => Self::LastYear,
        }
    }
}
