//! Integration tests: load a feature collection from disk, analyze it,
//! and write both artifacts.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use std::fs;

use quakegraph_analysis::{AnalysisConfig, EventFilter, pipeline};
use quakegraph_io::{OutputPaths, StoreError, annotate_document, load_dataset, write_json};
use serde_json::{Value, json};

fn collection() -> Value {
    json!({
        "type": "FeatureCollection",
        "metadata": {"title": "USGS Magnitude 4.5+ Earthquakes, Past Month"},
        "features": [
            {
                "type": "Feature",
                "id": "us7000a",
                "properties": {"place": "80 km E of Miyako, Japan", "mag": 6.1, "time": 1_700_000_000_000_i64, "tsunami": 0},
                "geometry": {"type": "Point", "coordinates": [142.8, 39.6, 30.2]}
            },
            {
                "type": "Feature",
                "id": "us7000b",
                "properties": {"place": "95 km E of Miyako, Japan", "mag": 5.3, "time": 1_700_086_400_000_i64, "tsunami": 0},
                "geometry": {"type": "Point", "coordinates": [143.0, 39.7]}
            },
            {
                "type": "Feature",
                "id": "us7000c",
                "properties": {"place": "South of the Fiji Islands", "mag": 4.7, "time": 1_700_000_500_000_i64, "tsunami": 0},
                "geometry": {"type": "Point", "coordinates": [-178.1, -25.9, 550.0]}
            }
        ]
    })
}

#[test]
fn end_to_end_writes_both_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("map.geojson");
    fs::write(&input, serde_json::to_string(&collection()).unwrap()).unwrap();

    let dataset = load_dataset(&input).unwrap();
    assert_eq!(dataset.events.len(), 3);

    let outcome = pipeline::run(
        dataset.events.clone(),
        &AnalysisConfig::default(),
        &EventFilter::default(),
    )
    .unwrap();

    let paths = OutputPaths::new(
        &dir.path().join("public").join("data"),
        "earthquake_analysis.json",
        "processed_map.geojson",
    );
    write_json(&paths.analysis, &outcome.document, false).unwrap();
    let annotated = annotate_document(&dataset.document, &outcome.annotated).unwrap();
    write_json(&paths.annotated, &annotated, true).unwrap();

    let analysis: Value = serde_json::from_str(&fs::read_to_string(&paths.analysis).unwrap()).unwrap();
    assert_eq!(analysis["countries"][0], json!({"country": "Japan", "count": 2}));
    assert_eq!(analysis["countries"][1], json!({"country": "Unknown", "count": 1}));
    assert_eq!(analysis["country_data"]["Japan"][1]["depth"], json!(0.0));

    let edges = analysis["relationships"]["us7000a"].as_array().unwrap();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0]["target_id"], "us7000b");
    assert_eq!(edges[0]["target_mag"], 5.3);
    assert_eq!(edges[0]["target_magnitude_level"], "Strong (5.0-5.9)");
    let similarity = edges[0]["similarity"].as_f64().unwrap();
    assert!(similarity > 0.25 && similarity <= 1.0);

    let copy: Value = serde_json::from_str(&fs::read_to_string(&paths.annotated).unwrap()).unwrap();
    assert_eq!(copy["metadata"], collection()["metadata"]);
    let levels: Vec<&str> = copy["features"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["properties"]["magnitude_level"].as_str().unwrap())
        .collect();
    assert_eq!(
        levels,
        vec!["Major (6.0-6.9)", "Strong (5.0-5.9)", "Moderate (4.5-4.9)"]
    );
    assert_eq!(copy["features"][0]["properties"]["tsunami"], 0);
}

#[test]
fn identical_input_gives_identical_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("map.geojson");
    fs::write(&input, serde_json::to_string(&collection()).unwrap()).unwrap();

    let mut outputs = Vec::new();
    for run in 0..2 {
        let dataset = load_dataset(&input).unwrap();
        let outcome = pipeline::run(
            dataset.events,
            &AnalysisConfig::default(),
            &EventFilter::default(),
        )
        .unwrap();
        let path = dir.path().join(format!("run{run}.json"));
        write_json(&path, &outcome.document, false).unwrap();
        outputs.push(fs::read(&path).unwrap());
    }
    assert_eq!(outputs[0], outputs[1]);
}

#[test]
fn malformed_feature_aborts_load() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.geojson");
    let mut document = collection();
    document["features"][1]["properties"]
        .as_object_mut()
        .unwrap()
        .remove("time");
    fs::write(&input, serde_json::to_string(&document).unwrap()).unwrap();

    let err = load_dataset(&input).unwrap_err();
    assert!(matches!(err, StoreError::InvalidFeature { index: 1, .. }));
    assert!(err.to_string().contains("us7000b"));
}

#[test]
fn unreadable_input_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.geojson");
    let err = load_dataset(&missing).unwrap_err();
    assert!(matches!(err, StoreError::Read { .. }));
    assert!(err.to_string().contains("nope.geojson"));
}
