//! GeoJSON loading, validation, and artifact writing for Quakegraph.
//!
//! These are the collaborators around the analysis core: they turn a file
//! on disk into an in-memory event collection, and turn finished results
//! back into files. Nothing here computes.
//!
//! # Modules
//!
//! - [`geojson`] -- Feature decoding with per-feature errors, annotated copy.
//! - [`store`] -- File reading, JSON writing with directory creation.
//! - [`error`] -- [`StoreError`].

pub mod error;
pub mod geojson;
pub mod store;

pub use error::StoreError;
pub use geojson::{annotate_document, decode_events, decode_feature};
pub use store::{Dataset, OutputPaths, load_dataset, write_json};
