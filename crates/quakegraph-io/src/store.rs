//! Filesystem access: reading the input document and writing artifacts.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use quakegraph_types::Event;

use crate::error::StoreError;
use crate::geojson::decode_events;

/// A loaded input document and the events decoded from it.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// The raw document, kept for the annotated copy.
    pub document: Value,
    /// One event per feature, in feature order.
    pub events: Vec<Event>,
}

impl Dataset {
    /// Decode a dataset from an in-memory JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Json`] for malformed JSON, or any decoding
    /// error from [`decode_events`].
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let document: Value = serde_json::from_str(json)?;
        let events = decode_events(&document)?;
        Ok(Self { document, events })
    }
}

/// Read and decode a GeoJSON feature collection.
///
/// # Errors
///
/// Returns [`StoreError::Read`] if the file cannot be read, or any error
/// from [`Dataset::from_json`].
pub fn load_dataset(path: &Path) -> Result<Dataset, StoreError> {
    let contents = fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = Dataset::from_json(&contents)?;
    info!(
        path = %path.display(),
        features = dataset.events.len(),
        "GeoJSON loaded"
    );
    Ok(dataset)
}

/// Serialize `value` to `path`, creating parent directories first.
///
/// # Errors
///
/// Returns [`StoreError::Write`] for filesystem failures or
/// [`StoreError::Json`] if serialization fails.
pub fn write_json<T: Serialize>(path: &Path, value: &T, pretty: bool) -> Result<(), StoreError> {
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let file = fs::File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writer.flush().map_err(write_err)?;

    info!(path = %path.display(), "Artifact written");
    Ok(())
}

/// Resolved locations of both artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// The analysis document.
    pub analysis: PathBuf,
    /// The annotated copy of the input.
    pub annotated: PathBuf,
}

impl OutputPaths {
    /// Join both file names onto `directory`.
    pub fn new(directory: &Path, analysis_file: &str, annotated_file: &str) -> Self {
        Self {
            analysis: directory.join(analysis_file),
            annotated: directory.join(annotated_file),
        }
    }
}
