//! Seismic event analysis for the Quakegraph pipeline.
//!
//! This crate turns a parsed event collection into per-country counts and a
//! similarity graph linking significant earthquakes to spatiotemporally
//! nearby events. It performs no I/O.
//!
//! # Modules
//!
//! - [`classifier`] -- Magnitude -> [`MagnitudeLevel`] bucket, annotation.
//! - [`aggregator`] -- Country key derivation, grouping, sorted counts.
//! - [`similarity`] -- Pairwise scoring and relationship graph construction.
//! - [`assembler`] -- Merges stage outputs into an [`AnalysisDocument`].
//! - [`filter`] -- Magnitude-level and date-range event filters.
//! - [`views`] -- Depth/time series and relationship network views.
//! - [`pipeline`] -- Runs every stage in order.
//! - [`config`] -- Typed YAML configuration.
//! - [`error`] -- Error types for analysis operations.
//!
//! [`MagnitudeLevel`]: quakegraph_types::MagnitudeLevel
//! [`AnalysisDocument`]: quakegraph_types::AnalysisDocument

pub mod aggregator;
pub mod assembler;
pub mod classifier;
pub mod config;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod similarity;
pub mod views;

// Re-export primary types at crate root.
pub use aggregator::{CountryAggregate, aggregate, country_key};
pub use assembler::{AnalysisOutcome, assemble};
pub use classifier::{annotate, annotate_all, classify};
pub use config::{AnalysisConfig, ConfigError, QuakegraphConfig, SimilarityWeights};
pub use error::AnalysisError;
pub use filter::{DatePreset, DateRange, EventFilter, LevelFilter};
pub use similarity::build_relationships;
pub use views::{depth_time_series, relationship_network};
