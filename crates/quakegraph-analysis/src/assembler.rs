//! Result assembly: merges stage outputs into the exported document.

use quakegraph_types::{AnalysisDocument, AnnotatedEvent, CountryCount, CountryGroup, RelationshipGraph};

/// Everything one pipeline run produces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisOutcome {
    /// The full input collection with magnitude levels attached, in input
    /// order and unaffected by any event filter.
    pub annotated: Vec<AnnotatedEvent>,
    /// The analysis document.
    pub document: AnalysisDocument,
}

/// Merge counts, groups and graph into one document. No computation.
pub fn assemble(
    counts: Vec<CountryCount>,
    country_data: CountryGroup,
    relationships: RelationshipGraph,
) -> AnalysisDocument {
    AnalysisDocument {
        countries: counts,
        country_data,
        relationships,
    }
}
