//! Similarity engine: links significant events to nearby related events.
//!
//! For each significant event (the *origin*) every other event in the
//! collection is scanned. A candidate is scored only when it is strong
//! enough and close enough in both time and space; an edge is kept when
//! the score clears the similarity threshold.
//!
//! # Score
//!
//! ```text
//! similarity = 1 / (1 + w_t * days + w_l * degrees + w_m * |dmag|)
//! ```
//!
//! Distance is planar Euclidean on raw longitude/latitude degrees with no
//! geodesic correction. The score lies in `(0, 1]` and equals `1.0` only
//! when origin and candidate coincide in time, place and magnitude.
//!
//! # Ordering
//!
//! Origins are visited in input order and each origin's edges are appended
//! in input order, so the graph is fully determined by the input sequence.
//! The parallel scan maps origins independently and reassembles them in
//! the same order.

use std::hint::black_box;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::{debug, info};

use quakegraph_types::{AnnotatedEvent, RelationshipEdge, RelationshipGraph};

use crate::config::{AnalysisConfig, SimilarityWeights};

/// Milliseconds in one day.
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Report progress after this many origins.
const PROGRESS_INTERVAL: usize = 10;

// ---------------------------------------------------------------------------
// Metric
// ---------------------------------------------------------------------------

/// The three raw separations between two events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Separation {
    /// Absolute time gap in days.
    pub time_days: f64,
    /// Planar distance in degrees.
    pub location_degrees: f64,
    /// Absolute magnitude difference.
    pub magnitude: f64,
}

impl Separation {
    /// Measure the separation between two events.
    #[allow(clippy::cast_precision_loss)]
    pub fn between(a: &AnnotatedEvent, b: &AnnotatedEvent) -> Self {
        let a = &a.event;
        let b = &b.event;
        let time_days = a.time.abs_diff(b.time) as f64 / MS_PER_DAY;
        let dx = a.longitude - b.longitude;
        let dy = a.latitude - b.latitude;
        // Squares and root must come from libm `pow`; opaque exponents keep
        // the compiler from folding them into `x * x` and `sqrt`.
        let square = black_box(2.0);
        let root = black_box(0.5);
        let location_degrees = (dx.powf(square) + dy.powf(square)).powf(root);
        Self {
            time_days,
            location_degrees,
            magnitude: (a.magnitude - b.magnitude).abs(),
        }
    }

    /// Composite similarity score in `(0, 1]` for non-negative weights.
    #[allow(clippy::suboptimal_flops)]
    pub fn score(&self, weights: &SimilarityWeights) -> f64 {
        1.0 / (1.0
            + weights.time * self.time_days
            + weights.location * self.location_degrees
            + weights.magnitude * self.magnitude)
    }
}

/// Whether an event anchors a relationship scan.
pub fn is_significant(event: &AnnotatedEvent, config: &AnalysisConfig) -> bool {
    event.event.magnitude >= config.significant_magnitude
}

/// Whether an event may be linked from an origin.
pub fn is_candidate(event: &AnnotatedEvent, config: &AnalysisConfig) -> bool {
    event.event.magnitude >= config.candidate_magnitude
}

// ---------------------------------------------------------------------------
// Scan
// ---------------------------------------------------------------------------

/// Score one origin/candidate pair, returning the edge if it is kept.
///
/// Self-links (same id) and weak candidates are never scored.
pub fn relate(
    origin: &AnnotatedEvent,
    candidate: &AnnotatedEvent,
    config: &AnalysisConfig,
) -> Option<RelationshipEdge> {
    if candidate.event.id == origin.event.id || !is_candidate(candidate, config) {
        return None;
    }

    let separation = Separation::between(origin, candidate);
    if separation.time_days > config.max_time_diff_days
        || separation.location_degrees > config.max_location_diff_degrees
    {
        return None;
    }

    let similarity = separation.score(&config.weights);
    (similarity > config.min_similarity).then(|| RelationshipEdge {
        target_id: candidate.event.id.clone(),
        similarity,
        target_magnitude: candidate.event.magnitude,
        target_place: candidate.event.place.clone(),
        target_time: candidate.event.time,
        target_magnitude_level: candidate.magnitude_level,
    })
}

/// Scan the whole collection for edges leaving `origin`, in scan order.
pub fn edges_for(
    origin: &AnnotatedEvent,
    events: &[AnnotatedEvent],
    config: &AnalysisConfig,
) -> Vec<RelationshipEdge> {
    events
        .iter()
        .filter_map(|candidate| relate(origin, candidate, config))
        .collect()
}

/// Build the relationship graph.
///
/// Every significant event gets an entry, possibly empty. When two
/// significant events share an id the later scan replaces the earlier list
/// in place.
pub fn build_relationships(
    events: &[AnnotatedEvent],
    config: &AnalysisConfig,
) -> RelationshipGraph {
    let significant: Vec<&AnnotatedEvent> = events
        .iter()
        .filter(|event| is_significant(event, config))
        .collect();
    info!(
        significant = significant.len(),
        events = events.len(),
        parallel = config.parallel,
        "Building relationship graph"
    );

    let progress = Progress::new(significant.len());
    let scan = |origin: &AnnotatedEvent| {
        let edges = edges_for(origin, events, config);
        debug!(origin = %origin.event.id, edges = edges.len(), "Origin scanned");
        progress.advance();
        edges
    };

    let mut graph = RelationshipGraph::new();
    if config.parallel {
        let scanned: Vec<(&AnnotatedEvent, Vec<RelationshipEdge>)> = significant
            .par_iter()
            .map(|&origin| (origin, scan(origin)))
            .collect();
        for (origin, edges) in scanned {
            graph.insert(origin.event.id.as_str(), edges);
        }
    } else {
        for &origin in &significant {
            graph.insert(origin.event.id.as_str(), scan(origin));
        }
    }

    let edge_count: usize = graph.values().map(Vec::len).sum();
    info!(
        origins = graph.len(),
        edges = edge_count,
        "Relationship graph complete"
    );
    graph
}

/// Counts scanned origins across threads and logs every
/// [`PROGRESS_INTERVAL`] completions plus the last one.
#[derive(Debug)]
struct Progress {
    total: usize,
    done: AtomicUsize,
}

impl Progress {
    const fn new(total: usize) -> Self {
        Self {
            total,
            done: AtomicUsize::new(0),
        }
    }

    /// Record one scanned origin. Returns the running count when it was
    /// reported.
    fn advance(&self) -> Option<usize> {
        let processed = self.done.fetch_add(1, Ordering::Relaxed).saturating_add(1);
        let due = processed % PROGRESS_INTERVAL == 0 || processed == self.total;
        due.then(|| {
            self.report(processed);
            processed
        })
    }

    #[allow(clippy::cast_precision_loss)]
    fn report(&self, processed: usize) {
        let percent = processed as f64 / self.total as f64 * 100.0;
        info!(
            processed,
            total = self.total,
            percent = format_args!("{percent:.1}"),
            "Relationship scan progress"
        );
    }
}

#[cfg(test)]
mod tests {
    use quakegraph_types::{Event, EventId};

    use super::*;
    use crate::classifier::annotate;

    const DAY_MS: i64 = 86_400_000;

    fn quake(id: &str, time: i64, lon: f64, lat: f64, magnitude: f64) -> AnnotatedEvent {
        annotate(Event {
            id: EventId::from(id),
            time,
            longitude: lon,
            latitude: lat,
            depth: 10.0,
            magnitude,
            place: format!("Near {id}, Testland"),
        })
    }

    fn edge_ids(graph: &RelationshipGraph, origin: &str) -> Vec<String> {
        graph
            .get(origin)
            .map(|edges| edges.iter().map(|e| e.target_id.to_string()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn identical_events_score_one() {
        let config = AnalysisConfig::default();
        let events = vec![quake("a", 0, 140.0, 35.0, 6.0), quake("b", 0, 140.0, 35.0, 6.0)];
        let graph = build_relationships(&events, &config);

        let edge = graph.get("a").and_then(|edges| edges.first());
        assert!(edge.is_some());
        let similarity = edge.map_or(0.0, |e| e.similarity);
        assert!((similarity - 1.0).abs() < 1e-12);
    }

    #[test]
    fn score_matches_reference_formula() {
        let config = AnalysisConfig::default();
        let origin = quake("a", 0, 0.0, 0.0, 6.0);
        let candidate = quake("b", 2 * DAY_MS, 3.0, 4.0, 5.5);

        let separation = Separation::between(&origin, &candidate);
        assert!((separation.time_days - 2.0).abs() < 1e-12);
        assert!((separation.location_degrees - 5.0).abs() < 1e-12);
        assert!((separation.magnitude - 0.5).abs() < 1e-12);

        // 1 / (1 + 0.6 + 2.5 + 0.1) = 1 / 4.2
        let expected = 1.0 / 4.2;
        assert!((separation.score(&config.weights) - expected).abs() < 1e-12);
        // Below 0.25, so not kept.
        assert!(relate(&origin, &candidate, &config).is_none());
    }

    #[test]
    fn distant_events_are_never_linked() {
        let config = AnalysisConfig::default();
        let events = vec![quake("a", 0, 0.0, 0.0, 6.0), quake("b", 0, 10.0, 0.0, 6.0)];
        let graph = build_relationships(&events, &config);
        assert!(edge_ids(&graph, "a").is_empty());
    }

    #[test]
    fn late_events_are_never_linked() {
        let config = AnalysisConfig::default();
        let events = vec![
            quake("a", 0, 0.0, 0.0, 6.0),
            quake("b", 7 * DAY_MS + 1, 0.0, 0.0, 6.0),
        ];
        let graph = build_relationships(&events, &config);
        assert!(edge_ids(&graph, "a").is_empty());
    }

    #[test]
    fn retention_bounds_are_inclusive() {
        let config = AnalysisConfig::default();
        let events = vec![
            quake("a", 0, 0.0, 0.0, 6.0),
            quake("week", 7 * DAY_MS, 0.0, 0.0, 6.0),
            quake("rim", 0, 5.0, 0.0, 6.0),
        ];
        let graph = build_relationships(&events, &config);
        let edges = graph.get("a").cloned().unwrap_or_default();
        let ids: Vec<&str> = edges.iter().map(|e| e.target_id.as_str()).collect();
        assert_eq!(ids, vec!["week", "rim"]);

        // 1 / (1 + 0.3 * 7) and 1 / (1 + 0.5 * 5)
        let scores: Vec<f64> = edges.iter().map(|e| e.similarity).collect();
        assert!((scores.first().copied().unwrap_or_default() - 1.0 / 3.1).abs() < 1e-12);
        assert!((scores.get(1).copied().unwrap_or_default() - 1.0 / 3.5).abs() < 1e-12);
    }

    #[test]
    fn distance_is_symmetric_and_near_sqrt() {
        let a = quake("a", 0, 236.728, 35.5, 6.0);
        let b = quake("b", 0, 231.019, 38.26, 5.1);
        let ab = Separation::between(&a, &b);
        let ba = Separation::between(&b, &a);
        assert_eq!(ab.location_degrees.to_bits(), ba.location_degrees.to_bits());

        let (dx, dy): (f64, f64) = (236.728 - 231.019, 35.5 - 38.26);
        let direct = (dx * dx + dy * dy).sqrt();
        assert!((ab.location_degrees - direct).abs() <= direct * 4.0 * f64::EPSILON);
    }

    #[test]
    fn progress_reports_every_interval_and_the_last_origin() {
        let progress = Progress::new(25);
        let reported: Vec<usize> = (0..25).filter_map(|_| progress.advance()).collect();
        assert_eq!(reported, vec![10, 20, 25]);
    }

    #[test]
    fn progress_counts_parallel_completions() {
        let progress = Progress::new(100);
        let reports = (0..100)
            .into_par_iter()
            .filter_map(|_| progress.advance())
            .count();
        assert_eq!(reports, 10);
    }

    #[test]
    fn weak_candidates_are_skipped() {
        let config = AnalysisConfig::default();
        let events = vec![quake("a", 0, 0.0, 0.0, 5.5), quake("b", 0, 0.0, 0.0, 4.9)];
        let graph = build_relationships(&events, &config);
        assert!(graph.contains_key("a"));
        assert!(edge_ids(&graph, "a").is_empty());
        assert!(!graph.contains_key("b"));
    }

    #[test]
    fn candidate_threshold_is_inclusive() {
        let config = AnalysisConfig::default();
        let events = vec![quake("a", 0, 0.0, 0.0, 5.5), quake("b", 0, 0.0, 0.0, 5.0)];
        let graph = build_relationships(&events, &config);
        assert_eq!(edge_ids(&graph, "a"), vec!["b".to_owned()]);
    }

    #[test]
    fn no_self_links() {
        let config = AnalysisConfig::default();
        let events = vec![quake("a", 0, 0.0, 0.0, 7.0)];
        let graph = build_relationships(&events, &config);
        assert_eq!(graph.len(), 1);
        assert!(edge_ids(&graph, "a").is_empty());
    }

    #[test]
    fn every_significant_event_has_an_entry() {
        let config = AnalysisConfig::default();
        let events = vec![
            quake("a", 0, 0.0, 0.0, 5.5),
            quake("b", 0, 50.0, 50.0, 6.1),
            quake("c", 0, -80.0, 10.0, 5.4),
        ];
        let graph = build_relationships(&events, &config);
        let keys: Vec<&str> = graph.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn edges_follow_scan_order_not_score() {
        let config = AnalysisConfig::default();
        let events = vec![
            quake("far", DAY_MS, 1.0, 0.0, 5.2),
            quake("origin", 0, 0.0, 0.0, 6.0),
            quake("near", 0, 0.0, 0.0, 6.0),
        ];
        let graph = build_relationships(&events, &config);
        assert_eq!(
            edge_ids(&graph, "origin"),
            vec!["far".to_owned(), "near".to_owned()]
        );
    }

    #[test]
    fn scores_stay_in_unit_interval() {
        let config = AnalysisConfig::default();
        let events: Vec<AnnotatedEvent> = (0..30_i32)
            .map(|i| {
                let step = f64::from(i);
                quake(
                    &format!("q{i}"),
                    i64::from(i) * DAY_MS / 5,
                    step * 0.3,
                    step * -0.2,
                    5.0 + step * 0.1,
                )
            })
            .collect();
        let graph = build_relationships(&events, &config);
        for edges in graph.values() {
            for edge in edges {
                assert!(edge.similarity > 0.25);
                assert!(edge.similarity <= 1.0);
            }
        }
    }

    #[test]
    fn parallel_scan_matches_sequential() {
        let sequential = AnalysisConfig::default();
        let parallel = AnalysisConfig {
            parallel: true,
            ..AnalysisConfig::default()
        };
        let events: Vec<AnnotatedEvent> = (0..40_i32)
            .map(|i| {
                let step = f64::from(i);
                quake(
                    &format!("q{i}"),
                    i64::from(i) * DAY_MS / 3,
                    (step * 0.7) % 4.0,
                    (step * 1.3) % 3.0,
                    5.0 + (step * 0.37) % 2.5,
                )
            })
            .collect();
        assert_eq!(
            build_relationships(&events, &sequential),
            build_relationships(&events, &parallel)
        );
    }

    #[test]
    fn duplicate_origin_id_keeps_first_position() {
        let config = AnalysisConfig::default();
        let events = vec![
            quake("dup", 0, 0.0, 0.0, 6.0),
            quake("x", 0, 0.0, 0.0, 6.0),
            quake("dup", 0, 0.0, 0.0, 6.0),
        ];
        let graph = build_relationships(&events, &config);
        let keys: Vec<&str> = graph.keys().collect();
        assert_eq!(keys, vec!["dup", "x"]);
        assert_eq!(edge_ids(&graph, "dup"), vec!["x".to_owned()]);
    }

    #[test]
    fn empty_input_yields_empty_graph() {
        let graph = build_relationships(&[], &AnalysisConfig::default());
        assert!(graph.is_empty());
    }
}
