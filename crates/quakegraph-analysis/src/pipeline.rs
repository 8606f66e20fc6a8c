//! End-to-end analysis over an in-memory event collection.
//!
//! ```text
//! events --> classify --> filter --> aggregate ---------+
//!                                \-> build_relationships -+--> assemble
//! ```
//!
//! The pipeline performs no I/O. Loading and writing belong to
//! `quakegraph-io`.

use tracing::info;

use quakegraph_types::Event;

use crate::aggregator::aggregate;
use crate::assembler::{AnalysisOutcome, assemble};
use crate::classifier::annotate_all;
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::filter::EventFilter;
use crate::similarity::build_relationships;

/// Run every stage over `events`.
///
/// The annotated collection in the outcome always covers every input
/// event; `filter` only narrows what the aggregation and relationship
/// stages see.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidConfig`] if `config` fails validation.
pub fn run(
    events: Vec<Event>,
    config: &AnalysisConfig,
    filter: &EventFilter,
) -> Result<AnalysisOutcome, AnalysisError> {
    config.validate()?;
    info!(events = events.len(), "Analysis started");

    let annotated = annotate_all(events);

    let selected;
    let scope = if filter.is_pass_through() {
        annotated.as_slice()
    } else {
        selected = filter.apply(&annotated);
        selected.as_slice()
    };

    let countries = aggregate(scope);
    let relationships = build_relationships(scope, config);
    let document = assemble(countries.counts, countries.groups, relationships);

    info!(
        countries = document.countries.len(),
        significant = document.relationships.len(),
        "Analysis complete"
    );

    Ok(AnalysisOutcome {
        annotated,
        document,
    })
}

#[cfg(test)]
mod tests {
    use quakegraph_types::{EventId, MagnitudeLevel};

    use super::*;
    use crate::filter::LevelFilter;

    fn event(id: &str, time: i64, magnitude: f64, place: &str) -> Event {
        Event {
            id: EventId::from(id),
            time,
            longitude: 10.0,
            latitude: 10.0,
            depth: 5.0,
            magnitude,
            place: place.to_owned(),
        }
    }

    #[test]
    fn empty_input_is_valid() {
        let outcome = run(Vec::new(), &AnalysisConfig::default(), &EventFilter::default());
        assert!(outcome.is_ok());
        let outcome = outcome.unwrap_or_default();
        assert!(outcome.annotated.is_empty());
        assert!(outcome.document.countries.is_empty());
        assert!(outcome.document.country_data.is_empty());
        assert!(outcome.document.relationships.is_empty());
    }

    #[test]
    fn filter_narrows_analysis_but_not_annotation() {
        let events = vec![
            event("a", 0, 6.5, "X, Japan"),
            event("b", 1_000, 5.2, "Y, Japan"),
            event("c", 2_000, 6.1, "Z, Chile"),
        ];
        let filter = EventFilter {
            level: LevelFilter::Only(MagnitudeLevel::Major),
            dates: None,
        };
        let outcome = run(events, &AnalysisConfig::default(), &filter);
        assert!(outcome.is_ok());
        let outcome = outcome.unwrap_or_default();

        assert_eq!(outcome.annotated.len(), 3);
        let total: usize = outcome.document.countries.iter().map(|c| c.count).sum();
        assert_eq!(total, 2);
        // "b" was filtered out, so "a" only links to "c".
        let targets: Vec<&str> = outcome
            .document
            .relationships
            .get("a")
            .map(|edges| edges.iter().map(|e| e.target_id.as_str()).collect())
            .unwrap_or_default();
        assert_eq!(targets, vec!["c"]);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = AnalysisConfig {
            max_time_diff_days: f64::NAN,
            ..AnalysisConfig::default()
        };
        let outcome = run(Vec::new(), &config, &EventFilter::default());
        assert!(matches!(outcome, Err(AnalysisError::InvalidConfig(_))));
    }
}
