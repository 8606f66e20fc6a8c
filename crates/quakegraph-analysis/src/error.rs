//! Error types for the `quakegraph-analysis` crate.
//!
//! The pipeline itself is total over a well-formed event collection; the
//! only failures it reports are bad configuration and inconsistent
//! requests against already-built results.

use quakegraph_types::EventId;

/// Errors that can occur during analysis.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// A threshold, weight or filter bound is out of range.
    #[error("invalid analysis config: {0}")]
    InvalidConfig(String),

    /// A date range whose start lies after its end.
    #[error("date range start {start} is after end {end}")]
    InvertedDateRange {
        /// Start bound in epoch milliseconds.
        start: i64,
        /// End bound in epoch milliseconds.
        end: i64,
    },

    /// The requested event is not a significant event in the graph.
    #[error("event {0} has no entry in the relationship graph")]
    NotInGraph(EventId),
}
