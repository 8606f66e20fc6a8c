//! Core record types for the Quakegraph pipeline.
//!
//! Data flows one way: [`Event`] (parsed from a feature) becomes
//! [`AnnotatedEvent`] once the classifier has run, and the aggregation and
//! relationship stages read the annotated collection to produce
//! [`CountryCount`], [`EventSummary`] and [`RelationshipEdge`] values that
//! are merged into an [`AnalysisDocument`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{MagnitudeBand, MagnitudeLevel};
use crate::ids::EventId;
use crate::ordered::OrderedMap;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// One seismic record as read from the input collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Event {
    /// Catalog identifier, stable across runs.
    pub id: EventId,
    /// Origin time in milliseconds since the Unix epoch.
    #[ts(type = "number")]
    pub time: i64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Hypocenter depth in kilometers (0 when the source omits it).
    pub depth: f64,
    /// Magnitude on whatever scale the catalog reports.
    pub magnitude: f64,
    /// Free-text place description, e.g. `10km SE of Tokyo, Japan`.
    pub place: String,
}

/// An [`Event`] with its magnitude level attached.
///
/// Produced once by the classifier and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AnnotatedEvent {
    /// The underlying record.
    #[serde(flatten)]
    pub event: Event,
    /// Bucket assigned from `event.magnitude`.
    pub magnitude_level: MagnitudeLevel,
}

// ---------------------------------------------------------------------------
// Country aggregation
// ---------------------------------------------------------------------------

/// Per-event entry listed under a country in the analysis document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EventSummary {
    /// Origin time in milliseconds since the Unix epoch.
    #[ts(type = "number")]
    pub time: i64,
    /// Depth in kilometers.
    pub depth: f64,
    /// Magnitude.
    pub magnitude: f64,
    /// Full place description.
    pub place: String,
    /// Catalog identifier.
    pub id: EventId,
    /// Magnitude bucket.
    pub magnitude_level: MagnitudeLevel,
}

impl From<&AnnotatedEvent> for EventSummary {
    fn from(annotated: &AnnotatedEvent) -> Self {
        let event = &annotated.event;
        Self {
            time: event.time,
            depth: event.depth,
            magnitude: event.magnitude,
            place: event.place.clone(),
            id: event.id.clone(),
            magnitude_level: annotated.magnitude_level,
        }
    }
}

/// Number of events recorded under one country key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CountryCount {
    /// Country or region key.
    pub country: String,
    /// Events grouped under that key.
    pub count: usize,
}

/// Country key -> events in input order, keyed in first-seen order.
pub type CountryGroup = OrderedMap<Vec<EventSummary>>;

// ---------------------------------------------------------------------------
// Relationship graph
// ---------------------------------------------------------------------------

/// Directed link from a significant event to a nearby related event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RelationshipEdge {
    /// The related event.
    pub target_id: EventId,
    /// Composite similarity score in `(0, 1]`.
    pub similarity: f64,
    /// Magnitude of the related event.
    #[serde(rename = "target_mag")]
    pub target_magnitude: f64,
    /// Place description of the related event.
    pub target_place: String,
    /// Origin time of the related event in epoch milliseconds.
    #[ts(type = "number")]
    pub target_time: i64,
    /// Magnitude bucket of the related event.
    pub target_magnitude_level: MagnitudeLevel,
}

/// Significant-event id -> outgoing edges in scan order.
pub type RelationshipGraph = OrderedMap<Vec<RelationshipEdge>>;

// ---------------------------------------------------------------------------
// Analysis document
// ---------------------------------------------------------------------------

/// The exported analysis artifact consumed by the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AnalysisDocument {
    /// Country counts, highest count first.
    pub countries: Vec<CountryCount>,
    /// Events grouped by country key.
    #[ts(as = "BTreeMap<String, Vec<EventSummary>>")]
    pub country_data: CountryGroup,
    /// Relationship graph rooted at significant events.
    #[ts(as = "BTreeMap<String, Vec<RelationshipEdge>>")]
    pub relationships: RelationshipGraph,
}

// ---------------------------------------------------------------------------
// Dashboard views
// ---------------------------------------------------------------------------

/// A single point on a depth-over-time chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DepthPoint {
    /// Origin time in epoch milliseconds.
    #[ts(type = "number")]
    pub time: i64,
    /// Depth in kilometers.
    pub depth: f64,
    /// Magnitude.
    pub magnitude: f64,
    /// Place description.
    pub place: String,
    /// Catalog identifier.
    pub id: EventId,
}

/// A node in the relationship network around one significant event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NetworkNode {
    /// Catalog identifier.
    pub id: EventId,
    /// Magnitude.
    pub magnitude: f64,
    /// Place description.
    pub place: String,
    /// Origin time in epoch milliseconds.
    #[ts(type = "number")]
    pub time: i64,
    /// Whether this node is the selected significant event.
    pub is_center: bool,
    /// Display colour bucket.
    pub band: MagnitudeBand,
}

/// A weighted link between the center node and one related event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NetworkLink {
    /// The significant event.
    pub source: EventId,
    /// The related event.
    pub target: EventId,
    /// Similarity score carried over from the edge.
    pub similarity: f64,
}

/// Star-shaped network centered on one significant event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NetworkView {
    /// The selected significant event.
    pub center: EventId,
    /// Center node first, then one node per edge in edge order.
    pub nodes: Vec<NetworkNode>,
    /// One link per edge.
    pub links: Vec<NetworkLink>,
}
