//! Enumeration types for the Quakegraph pipeline.
//!
//! Labels serialize to the exact strings the dashboard filters on, so a
//! round trip through JSON never changes a bucket name.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Magnitude Level
// ---------------------------------------------------------------------------

/// Ordinal magnitude bucket attached to every event by the classifier.
///
/// The four buckets partition the real line at 5.0, 6.0 and 7.0, with each
/// boundary value belonging to the higher bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum MagnitudeLevel {
    /// Below 5.0.
    #[serde(rename = "Moderate (4.5-4.9)")]
    Moderate,
    /// From 5.0 up to but excluding 6.0.
    #[serde(rename = "Strong (5.0-5.9)")]
    Strong,
    /// From 6.0 up to but excluding 7.0.
    #[serde(rename = "Major (6.0-6.9)")]
    Major,
    /// 7.0 and above.
    #[serde(rename = "Great (7.0+)")]
    Great,
}

impl MagnitudeLevel {
    /// Every level in ascending order.
    pub const ALL: [Self; 4] = [Self::Moderate, Self::Strong, Self::Major, Self::Great];

    /// The display label, identical to the serialized form.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Moderate => "Moderate (4.5-4.9)",
            Self::Strong => "Strong (5.0-5.9)",
            Self::Major => "Major (6.0-6.9)",
            Self::Great => "Great (7.0+)",
        }
    }
}

impl fmt::Display for MagnitudeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string names no magnitude level.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown magnitude level '{0}' (expected moderate, strong, major or great)")]
pub struct UnknownMagnitudeLevel(pub String);

impl FromStr for MagnitudeLevel {
    type Err = UnknownMagnitudeLevel;

    /// Accepts either the full label (`Major (6.0-6.9)`) or the bare
    /// bucket name in any case (`major`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(level) = Self::ALL.iter().find(|level| level.label() == trimmed) {
            return Ok(*level);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "moderate" => Ok(Self::Moderate),
            "strong" => Ok(Self::Strong),
            "major" => Ok(Self::Major),
            "great" => Ok(Self::Great),
            _ => Err(UnknownMagnitudeLevel(s.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Magnitude Band
// ---------------------------------------------------------------------------

/// Colour bucket for nodes in the relationship network view.
///
/// Thresholds are inclusive lower bounds: 7.0, 6.0 and 5.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum MagnitudeBand {
    /// Below 5.0.
    Low,
    /// 5.0 and above.
    Elevated,
    /// 6.0 and above.
    High,
    /// 7.0 and above.
    Severe,
}

impl MagnitudeBand {
    /// Bucket a magnitude for display.
    pub const fn for_magnitude(magnitude: f64) -> Self {
        if magnitude >= 7.0 {
            Self::Severe
        } else if magnitude >= 6.0 {
            Self::High
        } else if magnitude >= 5.0 {
            Self::Elevated
        } else {
            Self::Low
        }
    }
}
