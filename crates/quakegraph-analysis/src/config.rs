//! Configuration loading and typed config structures for Quakegraph.
//!
//! Configuration lives in an optional `quakegraph.yaml`. Every field has a
//! default, and the analysis defaults reproduce the published thresholds
//! and weights exactly, so an empty file (or no file) yields the reference
//! output.

use std::path::Path;

use serde::Deserialize;

use crate::error::AnalysisError;

/// Environment variable that overrides `output.directory`.
pub const OUTPUT_DIR_ENV: &str = "QUAKEGRAPH_OUTPUT_DIR";

/// Environment variable that overrides `logging.level`.
pub const LOG_LEVEL_ENV: &str = "QUAKEGRAPH_LOG_LEVEL";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The parsed values are out of range.
    #[error("invalid config: {source}")]
    Invalid {
        /// The validation failure.
        #[from]
        source: AnalysisError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QuakegraphConfig {
    /// Thresholds and weights for the relationship scan.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Where and how artifacts are written.
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl QuakegraphConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `QUAKEGRAPH_OUTPUT_DIR` overrides `output.directory`
    /// - `QUAKEGRAPH_LOG_LEVEL` overrides `logging.level`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a threshold or weight is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a threshold or weight is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_overrides();
        config.analysis.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides on top of file values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var(OUTPUT_DIR_ENV) {
            self.output.directory = dir;
        }
        if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
            self.logging.level = level;
        }
    }
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// Thresholds for the relationship scan.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisConfig {
    /// Minimum magnitude for an event to anchor a scan.
    #[serde(default = "default_significant_magnitude")]
    pub significant_magnitude: f64,

    /// Minimum magnitude for an event to be linked from an anchor.
    #[serde(default = "default_candidate_magnitude")]
    pub candidate_magnitude: f64,

    /// Largest time gap, in days, that still counts as nearby.
    #[serde(default = "default_max_time_diff_days")]
    pub max_time_diff_days: f64,

    /// Largest planar distance, in degrees, that still counts as nearby.
    #[serde(default = "default_max_location_diff_degrees")]
    pub max_location_diff_degrees: f64,

    /// Edges are kept only when the score is strictly greater than this.
    #[serde(default = "default_min_similarity")]
    pub min_similarity: f64,

    /// Per-dimension weights of the similarity score.
    #[serde(default)]
    pub weights: SimilarityWeights,

    /// Scan significant events on the rayon thread pool.
    ///
    /// Output is identical either way.
    #[serde(default)]
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            significant_magnitude: default_significant_magnitude(),
            candidate_magnitude: default_candidate_magnitude(),
            max_time_diff_days: default_max_time_diff_days(),
            max_location_diff_degrees: default_max_location_diff_degrees(),
            min_similarity: default_min_similarity(),
            weights: SimilarityWeights::default(),
            parallel: false,
        }
    }
}

impl AnalysisConfig {
    /// Check that every threshold and weight is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let fields = [
            ("significant_magnitude", self.significant_magnitude),
            ("candidate_magnitude", self.candidate_magnitude),
            ("max_time_diff_days", self.max_time_diff_days),
            ("max_location_diff_degrees", self.max_location_diff_degrees),
            ("min_similarity", self.min_similarity),
            ("weights.time", self.weights.time),
            ("weights.location", self.weights.location),
            ("weights.magnitude", self.weights.magnitude),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(AnalysisError::InvalidConfig(format!(
                    "{name} must be finite, got {value}"
                )));
            }
            if value < 0.0 {
                return Err(AnalysisError::InvalidConfig(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }
        if self.min_similarity >= 1.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "min_similarity must be below 1.0, got {}",
                self.min_similarity
            )));
        }
        Ok(())
    }
}

/// Weights of the time, location and magnitude terms.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SimilarityWeights {
    /// Weight per day of separation.
    #[serde(default = "default_time_weight")]
    pub time: f64,
    /// Weight per degree of separation.
    #[serde(default = "default_location_weight")]
    pub location: f64,
    /// Weight per unit of magnitude difference.
    #[serde(default = "default_magnitude_weight")]
    pub magnitude: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            time: default_time_weight(),
            location: default_location_weight(),
            magnitude: default_magnitude_weight(),
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Artifact locations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// Directory both artifacts are written into. Created if missing.
    #[serde(default = "default_output_directory")]
    pub directory: String,

    /// File name of the analysis document.
    #[serde(default = "default_analysis_file")]
    pub analysis_file: String,

    /// File name of the annotated copy of the input.
    #[serde(default = "default_annotated_file")]
    pub annotated_file: String,

    /// Indent the written JSON.
    #[serde(default)]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            analysis_file: default_analysis_file(),
            annotated_file: default_annotated_file(),
            pretty: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

const fn default_significant_magnitude() -> f64 {
    5.5
}

const fn default_candidate_magnitude() -> f64 {
    5.0
}

const fn default_max_time_diff_days() -> f64 {
    7.0
}

const fn default_max_location_diff_degrees() -> f64 {
    5.0
}

const fn default_min_similarity() -> f64 {
    0.25
}

const fn default_time_weight() -> f64 {
    0.3
}

const fn default_location_weight() -> f64 {
    0.5
}

const fn default_magnitude_weight() -> f64 {
    0.2
}

fn default_output_directory() -> String {
    "public/data".to_owned()
}

fn default_analysis_file() -> String {
    "earthquake_analysis.json".to_owned()
}

fn default_annotated_file() -> String {
    "processed_map.geojson".to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}
