//! Error types for the operations layer.

use std::path::PathBuf;

use mtl_paths_core::Coordinates;
use thiserror::Error;

/// Result type for operations.
pub type OpsResult<T> = Result<T, OpsError>;

/// Errors that can occur during operations.
#[derive(Debug, Error)]
pub enum OpsError {
    /// No street feature sits exactly at the clicked marker. The rendered
    /// markers and the loaded features have diverged.
    #[error("Feature not found at {coordinates}")]
    FeatureNotFound { coordinates: Coordinates },

    /// The clicked curve index is not a trace of the figure.
    #[error("Curve {curve} is out of range (figure has {trace_count} traces)")]
    CurveOutOfRange { curve: usize, trace_count: usize },

    /// The clicked curve is not a marker trace.
    #[error("Curve {curve} is a {kind} trace, not a marker trace")]
    NotAMarkerTrace { curve: usize, kind: &'static str },

    /// The clicked point index is not a marker of the trace.
    #[error("Point {point} is out of range for curve {curve} ({len} markers)")]
    PointOutOfRange {
        curve: usize,
        point: usize,
        len: usize,
    },

    /// A GeoJSON file did not hold a feature collection.
    #[error("Expected a GeoJSON FeatureCollection in {path}")]
    NotAFeatureCollection { path: PathBuf },

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// GeoJSON parsing error.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] mtl_paths_core::geojson::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl OpsError {
    /// Whether this is the data-integrity failure of a marker lookup.
    pub fn is_feature_not_found(&self) -> bool {
        matches!(self, Self::FeatureNotFound { .. })
    }
}
