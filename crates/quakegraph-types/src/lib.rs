//! Shared type definitions for the Quakegraph seismic analysis pipeline.
//!
//! This crate is the single source of truth for the records passed between
//! pipeline stages and written to disk. Types defined here flow downstream
//! to `TypeScript` via `ts-rs` for the dashboard.
//!
//! # Modules
//!
//! - [`ids`] -- String newtype wrappers for catalog identifiers
//! - [`enums`] -- Magnitude level labels and display bands
//! - [`ordered`] -- Insertion-ordered map used for JSON objects with stable key order
//! - [`structs`] -- Events, country aggregates, relationship edges, views

pub mod enums;
pub mod ids;
pub mod ordered;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{MagnitudeBand, MagnitudeLevel, UnknownMagnitudeLevel};
pub use ids::EventId;
pub use ordered::OrderedMap;
pub use structs::{
    AnalysisDocument, AnnotatedEvent, CountryCount, CountryGroup, DepthPoint, Event,
    EventSummary, NetworkLink, NetworkNode, NetworkView, RelationshipEdge, RelationshipGraph,
};
