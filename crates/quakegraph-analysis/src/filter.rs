//! Event filters applied between classification and analysis.
//!
//! These mirror the dashboard's magnitude and date selectors so the same
//! slices can be precomputed in batch. Filtering never reorders events.

use chrono::{DateTime, Duration, Utc};
use quakegraph_types::{AnnotatedEvent, MagnitudeLevel};

use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Level filter
// ---------------------------------------------------------------------------

/// Restrict events to one magnitude level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LevelFilter {
    /// Keep every level.
    #[default]
    All,
    /// Keep only this level.
    Only(MagnitudeLevel),
}

impl LevelFilter {
    /// Whether an event passes.
    pub fn accepts(self, event: &AnnotatedEvent) -> bool {
        match self {
            Self::All => true,
            Self::Only(level) => event.magnitude_level == level,
        }
    }
}

// ---------------------------------------------------------------------------
// Date range
// ---------------------------------------------------------------------------

/// Relative date windows offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePreset {
    /// The last 7 days.
    LastWeek,
    /// The last 30 days.
    LastMonth,
    /// The last 90 days.
    Last3Months,
    /// The last 180 days.
    Last6Months,
    /// The last 365 days.
    LastYear,
}

impl DatePreset {
    /// Window length in days.
    pub const fn days(self) -> i64 {
        match self {
            Self::LastWeek => 7,
            Self::LastMonth => 30,
            Self::Last3Months => 90,
            Self::Last6Months => 180,
            Self::LastYear => 365,
        }
    }

    /// Resolve against a reference instant, ending at that instant.
    pub fn resolve(self, reference: DateTime<Utc>) -> DateRange {
        let start = reference - Duration::days(self.days());
        DateRange {
            start: start.timestamp_millis(),
            end: reference.timestamp_millis(),
        }
    }
}

/// Inclusive time window in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// Earliest accepted time.
    pub start: i64,
    /// Latest accepted time.
    pub end: i64,
}

impl DateRange {
    /// Build a range, rejecting `start > end`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvertedDateRange`] when the bounds are swapped.
    pub const fn new(start: i64, end: i64) -> Result<Self, AnalysisError> {
        if start > end {
            return Err(AnalysisError::InvertedDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build a range from optional instants; a missing bound is open.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvertedDateRange`] when the bounds are swapped.
    pub fn between(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Self, AnalysisError> {
        Self::new(
            start.map_or(i64::MIN, |s| s.timestamp_millis()),
            end.map_or(i64::MAX, |e| e.timestamp_millis()),
        )
    }

    /// Whether `time` lies inside the window.
    pub const fn contains(&self, time: i64) -> bool {
        self.start <= time && time <= self.end
    }
}

// ---------------------------------------------------------------------------
// Combined filter
// ---------------------------------------------------------------------------

/// Magnitude and date restrictions applied together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Magnitude level restriction.
    pub level: LevelFilter,
    /// Optional date window.
    pub dates: Option<DateRange>,
}

impl EventFilter {
    /// Whether the filter keeps every event.
    pub const fn is_pass_through(&self) -> bool {
        matches!(self.level, LevelFilter::All) && self.dates.is_none()
    }

    /// Whether an event passes every restriction.
    pub fn accepts(&self, event: &AnnotatedEvent) -> bool {
        self.level.accepts(event)
            && self
                .dates
                .is_none_or(|range| range.contains(event.event.time))
    }

    /// Keep passing events in their original order.
    pub fn apply(&self, events: &[AnnotatedEvent]) -> Vec<AnnotatedEvent> {
        let kept: Vec<AnnotatedEvent> = events
            .iter()
            .filter(|event| self.accepts(event))
            .cloned()
            .collect();
        if !self.is_pass_through() {
            tracing::info!(
                before = events.len(),
                after = kept.len(),
                "Event filter applied"
            );
        }
        kept
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use quakegraph_types::{Event, EventId};

    use super::*;
    use crate::classifier::annotate;

    fn quake(id: &str, time: i64, magnitude: f64) -> AnnotatedEvent {
        annotate(Event {
            id: EventId::from(id),
            time,
            longitude: 0.0,
            latitude: 0.0,
            depth: 0.0,
            magnitude,
            place: "Somewhere, Peru".to_owned(),
        })
    }

    fn ids(events: &[AnnotatedEvent]) -> Vec<&str> {
        events.iter().map(|e| e.event.id.as_str()).collect()
    }

    #[test]
    fn default_filter_keeps_everything() {
        let events = vec![quake("a", 1, 4.6), quake("b", 2, 7.2)];
        let filter = EventFilter::default();
        assert!(filter.is_pass_through());
        assert_eq!(filter.apply(&events), events);
    }

    #[test]
    fn level_filter_keeps_matching_bucket() {
        let events = vec![quake("a", 1, 4.6), quake("b", 2, 6.4), quake("c", 3, 6.9)];
        let filter = EventFilter {
            level: LevelFilter::Only(MagnitudeLevel::Major),
            dates: None,
        };
        assert_eq!(ids(&filter.apply(&events)), vec!["b", "c"]);
    }

    #[test]
    fn date_range_is_inclusive() {
        let events = vec![quake("a", 100, 5.0), quake("b", 200, 5.0), quake("c", 301, 5.0)];
        let filter = EventFilter {
            level: LevelFilter::All,
            dates: DateRange::new(100, 300).ok(),
        };
        assert_eq!(ids(&filter.apply(&events)), vec!["a", "b"]);
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert_eq!(
            DateRange::new(10, 5),
            Err(AnalysisError::InvertedDateRange { start: 10, end: 5 })
        );
    }

    #[test]
    fn open_bounds_accept_extremes() {
        let range = DateRange::between(None, None);
        assert!(range.is_ok());
        let range = range.unwrap_or(DateRange { start: 0, end: 0 });
        assert!(range.contains(i64::MIN));
        assert!(range.contains(i64::MAX));
    }

    #[test]
    fn preset_resolves_backwards_from_reference() {
        let reference = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).single();
        assert!(reference.is_some());
        let reference = reference.unwrap_or_default();
        let range = DatePreset::LastMonth.resolve(reference);
        assert_eq!(range.end, reference.timestamp_millis());
        assert_eq!(range.end - range.start, 30 * 86_400_000);
    }
}
