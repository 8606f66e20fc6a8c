//! Error types for the `quakegraph-io` crate.
//!
//! Every variant aborts the run: there is no partial output.

use std::path::PathBuf;

/// Errors that can occur while loading or writing documents.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The input file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The path that failed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// An output file or its parent directory could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// The path that failed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The input is not valid JSON, or a value failed to serialize.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document has no `features` array.
    #[error("document has no `features` array")]
    MissingFeatures,

    /// A feature lacks a required member or has one of the wrong type.
    #[error("feature {index} ({id}) is invalid: {reason}")]
    InvalidFeature {
        /// Zero-based position in the `features` array.
        index: usize,
        /// The feature id, or `<no id>` when it cannot be read.
        id: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The annotated events do not line up with the document's features.
    #[error("document has {features} features but {events} annotated events were supplied")]
    FeatureCountMismatch {
        /// Features in the document.
        features: usize,
        /// Annotated events supplied.
        events: usize,
    },
}
