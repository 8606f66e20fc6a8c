//! GeoJSON feature decoding and annotation.
//!
//! Only the members the pipeline needs are decoded into typed records;
//! the raw document is kept as a [`Value`] so the annotated copy can carry
//! every other member through untouched.
//!
//! Required per feature: `id`, `properties.place`, `properties.mag`,
//! `properties.time` and `geometry.coordinates` with at least longitude and
//! latitude. The third coordinate (depth) is optional and defaults to 0.

use serde::Deserialize;
use serde_json::Value;

use quakegraph_types::{AnnotatedEvent, Event, EventId};

use crate::error::StoreError;

/// Property added to every feature of the annotated copy.
pub const MAGNITUDE_LEVEL_PROPERTY: &str = "magnitude_level";

/// Placeholder id used in errors when a feature's id is unreadable.
const NO_ID: &str = "<no id>";

/// The typed subset of a feature.
#[derive(Debug, Deserialize)]
struct FeatureRecord {
    id: String,
    properties: FeatureProperties,
    geometry: FeatureGeometry,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    place: String,
    mag: f64,
    time: i64,
}

#[derive(Debug, Deserialize)]
struct FeatureGeometry {
    coordinates: Vec<f64>,
}

/// Best-effort id for error messages.
fn feature_id(feature: &Value) -> String {
    feature
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or(NO_ID)
        .to_owned()
}

/// The `features` array of a document.
///
/// # Errors
///
/// Returns [`StoreError::MissingFeatures`] if there is no such array.
pub fn features(document: &Value) -> Result<&Vec<Value>, StoreError> {
    document
        .get("features")
        .and_then(Value::as_array)
        .ok_or(StoreError::MissingFeatures)
}

/// Decode one feature into an [`Event`].
///
/// # Errors
///
/// Returns [`StoreError::InvalidFeature`] naming `index` and the missing or
/// mistyped member.
pub fn decode_feature(index: usize, feature: &Value) -> Result<Event, StoreError> {
    let invalid = |reason: String| StoreError::InvalidFeature {
        index,
        id: feature_id(feature),
        reason,
    };

    let record = FeatureRecord::deserialize(feature).map_err(|e| invalid(e.to_string()))?;

    let (longitude, latitude, depth) = match record.geometry.coordinates.as_slice() {
        [longitude, latitude] => (*longitude, *latitude, 0.0),
        [longitude, latitude, depth, ..] => (*longitude, *latitude, *depth),
        short => {
            return Err(invalid(format!(
                "geometry.coordinates needs at least 2 values, got {}",
                short.len()
            )));
        }
    };

    Ok(Event {
        id: EventId::new(record.id),
        time: record.properties.time,
        longitude,
        latitude,
        depth,
        magnitude: record.properties.mag,
        place: record.properties.place,
    })
}

/// Decode every feature of a document, failing on the first bad one.
///
/// # Errors
///
/// Returns [`StoreError::MissingFeatures`] or [`StoreError::InvalidFeature`].
pub fn decode_events(document: &Value) -> Result<Vec<Event>, StoreError> {
    features(document)?
        .iter()
        .enumerate()
        .map(|(index, feature)| decode_feature(index, feature))
        .collect()
}

/// Copy `document`, adding `properties.magnitude_level` to every feature.
///
/// `annotated` must be the classifier output for the same document, one
/// entry per feature in feature order.
///
/// # Errors
///
/// Returns [`StoreError::FeatureCountMismatch`] when the lengths differ,
/// [`StoreError::MissingFeatures`] when the document has no features array,
/// or [`StoreError::InvalidFeature`] when a feature has no properties object.
pub fn annotate_document(
    document: &Value,
    annotated: &[AnnotatedEvent],
) -> Result<Value, StoreError> {
    let mut copy = document.clone();
    let features = copy
        .get_mut("features")
        .and_then(Value::as_array_mut)
        .ok_or(StoreError::MissingFeatures)?;
    if features.len() != annotated.len() {
        return Err(StoreError::FeatureCountMismatch {
            features: features.len(),
            events: annotated.len(),
        });
    }

    for (index, (feature, event)) in features.iter_mut().zip(annotated).enumerate() {
        let id = feature_id(feature);
        let properties = feature
            .get_mut("properties")
            .and_then(Value::as_object_mut)
            .ok_or_else(|| StoreError::InvalidFeature {
                index,
                id,
                reason: "properties is not an object".to_owned(),
            })?;
        properties.insert(
            MAGNITUDE_LEVEL_PROPERTY.to_owned(),
            Value::String(event.magnitude_level.label().to_owned()),
        );
    }

    Ok(copy)
}
