//! Subcommand handlers.
//!
//! Each handler loads the input, runs the pipeline with the selected
//! filter, and either writes the artifacts or prints a view to stdout.

use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use quakegraph_analysis::{
    AnalysisOutcome, DatePreset, DateRange, EventFilter, LevelFilter, QuakegraphConfig,
    depth_time_series, pipeline, relationship_network,
};
use quakegraph_io::{Dataset, OutputPaths, annotate_document, load_dataset, write_json};
use quakegraph_types::EventId;

use crate::cli::{AnalyzeArgs, DepthSeriesArgs, NetworkArgs, SelectionArgs};
use crate::error::CliError;

/// Build the event filter from selection flags.
///
/// `--last` resolves against the current time.
pub fn event_filter(selection: &SelectionArgs) -> Result<EventFilter, CliError> {
    let level = selection.level.map_or(LevelFilter::All, LevelFilter::Only);
    let dates = if let Some(window) = selection.last {
        Some(DatePreset::from(window).resolve(Utc::now()))
    } else if selection.start.is_some() || selection.end.is_some() {
        Some(DateRange::between(selection.start, selection.end)?)
    } else {
        None
    };
    Ok(EventFilter { level, dates })
}

/// Load the input and run the pipeline.
///
/// The returned dataset keeps its raw document; its decoded events have
/// moved into the outcome.
fn analyze_input(
    selection: &SelectionArgs,
    config: &QuakegraphConfig,
) -> Result<(Dataset, AnalysisOutcome), CliError> {
    let filter = event_filter(selection)?;
    let mut analysis = config.analysis.clone();
    analysis.parallel |= selection.parallel;

    let mut dataset = load_dataset(&selection.input)?;
    let events = std::mem::take(&mut dataset.events);
    let outcome = pipeline::run(events, &analysis, &filter)?;
    Ok((dataset, outcome))
}

/// `analyze`: write the analysis document and the annotated copy.
pub fn analyze(args: &AnalyzeArgs, config: &QuakegraphConfig) -> Result<OutputPaths, CliError> {
    let (dataset, outcome) = analyze_input(&args.selection, config)?;

    let directory = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.directory));
    let paths = OutputPaths::new(
        &directory,
        &config.output.analysis_file,
        &config.output.annotated_file,
    );
    let pretty = args.pretty || config.output.pretty;

    let annotated = annotate_document(&dataset.document, &outcome.annotated)?;
    write_json(&paths.analysis, &outcome.document, pretty)?;
    write_json(&paths.annotated, &annotated, pretty)?;

    info!(
        analysis = %paths.analysis.display(),
        annotated = %paths.annotated.display(),
        "Processing complete"
    );
    Ok(paths)
}

/// `depth-series`: print one country's depth/time points.
pub fn depth_series(
    args: &DepthSeriesArgs,
    config: &QuakegraphConfig,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let (_, outcome) = analyze_input(&args.selection, config)?;
    let series = depth_time_series(&outcome.document.country_data, &args.country);
    info!(country = %args.country, points = series.len(), "Depth series built");
    print_json(out, &series)
}

/// `network`: print the network around one significant event.
pub fn network(
    args: &NetworkArgs,
    config: &QuakegraphConfig,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let (_, outcome) = analyze_input(&args.selection, config)?;
    let id = EventId::new(args.id.as_str());
    let view = relationship_network(&outcome.document.relationships, &outcome.annotated, &id)?;
    info!(center = %id, related = view.links.len(), "Network built");
    print_json(out, &view)
}

fn print_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
