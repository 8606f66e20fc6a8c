//! Error types for the `quakegraph` binary.
//!
//! [`CliError`] wraps every subsystem error so command handlers can
//! propagate with `?`; `main` adds path context through `anyhow`.

/// Top-level error for the `quakegraph` binary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: quakegraph_analysis::ConfigError,
    },

    /// Analysis rejected its inputs.
    #[error("analysis error: {source}")]
    Analysis {
        /// The underlying analysis error.
        #[from]
        source: quakegraph_analysis::AnalysisError,
    },

    /// Reading the input or writing an artifact failed.
    #[error("store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: quakegraph_io::StoreError,
    },

    /// Writing to standard output failed.
    #[error("output I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Serializing a view failed.
    #[error("output error: {source}")]
    Output {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// The logging subscriber could not be installed.
    #[error("logging error: {message}")]
    Logging {
        /// Description of the failure.
        message: String,
    },
}
