//! Country aggregation.
//!
//! Groups annotated events by the trailing segment of their place
//! description and counts each group. Keys are compared byte-for-byte with
//! no case folding or trimming.

use quakegraph_types::{AnnotatedEvent, CountryCount, CountryGroup, EventSummary};

/// Separator between place segments.
pub const PLACE_SEPARATOR: &str = ", ";

/// Key used when a place has no separator.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Events grouped by country plus the derived counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryAggregate {
    /// Country key -> summaries in input order, keys in first-seen order.
    pub groups: CountryGroup,
    /// One count per group, highest first, first-seen order among ties.
    pub counts: Vec<CountryCount>,
}

/// Derive the country key from a place description.
///
/// Returns the text after the last `", "`, or [`UNKNOWN_COUNTRY`] when the
/// separator does not occur.
///
/// ```
/// use quakegraph_analysis::aggregator::country_key;
///
/// assert_eq!(country_key("10km SE of Tokyo, Japan"), "Japan");
/// assert_eq!(country_key("Central Pacific"), "Unknown");
/// ```
pub fn country_key(place: &str) -> &str {
    place
        .rsplit_once(PLACE_SEPARATOR)
        .map_or(UNKNOWN_COUNTRY, |(_, country)| country)
}

/// Group events by country and count each group.
pub fn aggregate(events: &[AnnotatedEvent]) -> CountryAggregate {
    let mut groups = CountryGroup::new();
    for annotated in events {
        groups
            .get_or_insert_with(country_key(&annotated.event.place), Vec::new)
            .push(EventSummary::from(annotated));
    }

    let counts = count_groups(&groups);
    tracing::debug!(
        events = events.len(),
        countries = groups.len(),
        "Country aggregation complete"
    );

    CountryAggregate { groups, counts }
}

/// Count each group and order by count, highest first.
///
/// The sort is stable, so groups with equal counts stay in the order their
/// country was first seen.
pub fn count_groups(groups: &CountryGroup) -> Vec<CountryCount> {
    let mut counts: Vec<CountryCount> = groups
        .iter()
        .map(|(country, summaries)| CountryCount {
            country: country.to_owned(),
            count: summaries.len(),
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
