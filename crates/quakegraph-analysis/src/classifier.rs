//! Magnitude classification.
//!
//! Maps a magnitude onto one of four ordinal [`MagnitudeLevel`] buckets.
//! Classification is pure and total: every `f64` (including NaN, which
//! lands in the lowest bucket because every comparison with it is false)
//! gets exactly one label.

use quakegraph_types::{AnnotatedEvent, Event, MagnitudeLevel};

/// Lower bound of [`MagnitudeLevel::Strong`].
pub const STRONG_FROM: f64 = 5.0;

/// Lower bound of [`MagnitudeLevel::Major`].
pub const MAJOR_FROM: f64 = 6.0;

/// Lower bound of [`MagnitudeLevel::Great`].
pub const GREAT_FROM: f64 = 7.0;

/// Classify a magnitude. Boundary values belong to the higher bucket.
pub const fn classify(magnitude: f64) -> MagnitudeLevel {
    if magnitude >= GREAT_FROM {
        MagnitudeLevel::Great
    } else if magnitude >= MAJOR_FROM {
        MagnitudeLevel::Major
    } else if magnitude >= STRONG_FROM {
        MagnitudeLevel::Strong
    } else {
        MagnitudeLevel::Moderate
    }
}

/// Attach a magnitude level to a single event.
pub fn annotate(event: Event) -> AnnotatedEvent {
    let magnitude_level = classify(event.magnitude);
    AnnotatedEvent {
        event,
        magnitude_level,
    }
}

/// Annotate a whole collection, preserving order.
pub fn annotate_all(events: Vec<Event>) -> Vec<AnnotatedEvent> {
    events.into_iter().map(annotate).collect()
}
