//! Read-only views derived from finished analysis results.
//!
//! - [`depth_time_series`] flattens one country's events into chart points.
//! - [`relationship_network`] expands one graph entry into a star network.

use quakegraph_types::{
    AnnotatedEvent, CountryGroup, DepthPoint, EventId, MagnitudeBand, NetworkLink, NetworkNode,
    NetworkView, RelationshipGraph,
};

use crate::aggregator::UNKNOWN_COUNTRY;
use crate::error::AnalysisError;

/// Depth-over-time points for one country, oldest first.
///
/// Selecting [`UNKNOWN_COUNTRY`] merges every country's events. Points with
/// a non-positive time or a non-finite depth are dropped. An unknown
/// country yields an empty series.
pub fn depth_time_series(groups: &CountryGroup, country: &str) -> Vec<DepthPoint> {
    let mut points: Vec<DepthPoint> = if country == UNKNOWN_COUNTRY {
        groups.values().flatten().map(point_from).collect()
    } else {
        groups
            .get(country)
            .map(|summaries| summaries.iter().map(point_from).collect())
            .unwrap_or_default()
    };
    points.retain(|point| point.time > 0 && point.depth.is_finite());
    points.sort_by_key(|point| point.time);
    points
}

fn point_from(summary: &quakegraph_types::EventSummary) -> DepthPoint {
    DepthPoint {
        time: summary.time,
        depth: summary.depth,
        magnitude: summary.magnitude,
        place: summary.place.clone(),
        id: summary.id.clone(),
    }
}

/// Build the network around one significant event.
///
/// # Errors
///
/// Returns [`AnalysisError::NotInGraph`] when `id` is not a key of `graph`
/// or no event with that id exists in `events`.
pub fn relationship_network(
    graph: &RelationshipGraph,
    events: &[AnnotatedEvent],
    id: &EventId,
) -> Result<NetworkView, AnalysisError> {
    let edges = graph
        .get(id.as_str())
        .ok_or_else(|| AnalysisError::NotInGraph(id.clone()))?;
    let center = events
        .iter()
        .find(|annotated| &annotated.event.id == id)
        .ok_or_else(|| AnalysisError::NotInGraph(id.clone()))?;

    let mut nodes = Vec::with_capacity(edges.len().saturating_add(1));
    nodes.push(NetworkNode {
        id: id.clone(),
        magnitude: center.event.magnitude,
        place: center.event.place.clone(),
        time: center.event.time,
        is_center: true,
        band: MagnitudeBand::for_magnitude(center.event.magnitude),
    });
    nodes.extend(edges.iter().map(|edge| NetworkNode {
        id: edge.target_id.clone(),
        magnitude: edge.target_magnitude,
        place: edge.target_place.clone(),
        time: edge.target_time,
        is_center: false,
        band: MagnitudeBand::for_magnitude(edge.target_magnitude),
    }));

    let links = edges
        .iter()
        .map(|edge| NetworkLink {
            source: id.clone(),
            target: edge.target_id.clone(),
            similarity: edge.similarity,
        })
        .collect();

    Ok(NetworkView {
        center: id.clone(),
        nodes,
        links,
    })
}
