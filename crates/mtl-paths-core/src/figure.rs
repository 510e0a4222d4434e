//! Plotly-compatible figure model.
//!
//! Serializes to the `{"data": [...], "layout": {...}}` shape plotly.js
//! renders. Only the trace kinds the dashboard draws are typed; keys that are
//! not modelled are kept in each struct's `extra` map.

use std::collections::BTreeMap;

use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geo::Coordinates;

/// A complete figure: traces plus layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    #[serde(default)]
    pub data: Vec<Trace>,
    #[serde(default)]
    pub layout: Layout,
}

impl Figure {
    pub fn new(layout: Layout) -> Self {
        Self {
            data: Vec::new(),
            layout,
        }
    }

    pub fn add_trace(&mut self, trace: Trace) -> &mut Self {
        self.data.push(trace);
        self
    }

    pub fn add_traces(&mut self, traces: impl IntoIterator<Item = Trace>) -> &mut Self {
        self.data.extend(traces);
        self
    }

    pub fn trace(&self, curve: usize) -> Option<&Trace> {
        self.data.get(curve)
    }

    pub fn trace_count(&self) -> usize {
        self.data.len()
    }

    /// Scatter traces in figure order.
    pub fn scatter_traces(&self) -> impl Iterator<Item = &ScatterTrace> {
        self.data.iter().filter_map(|trace| match trace {
            Trace::Scattermapbox(scatter) => Some(scatter),
            _ => None,
        })
    }
}

// =============================================================================
// Traces
// =============================================================================

/// Trace kinds drawn on the map, tagged by plotly's `type` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Choroplethmapbox(ChoroplethTrace),
    Scattermapbox(ScatterTrace),
}

impl Trace {
    pub fn kind(&self) -> &'static str {
        match self {
            Trace::Choroplethmapbox(_) => "choroplethmapbox",
            Trace::Scattermapbox(_) => "scattermapbox",
        }
    }

    pub fn is_marker_trace(&self) -> bool {
        matches!(self, Trace::Scattermapbox(_))
    }
}

/// One colorscale stop, serialized as `[position, color]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop(pub f64, pub String);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerLine {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoroplethMarker {
    pub line: MarkerLine,
    pub opacity: f64,
}

/// Filled polygons matched to `locations` through `featureidkey`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoroplethTrace {
    pub geojson: FeatureCollection,
    pub locations: Vec<String>,
    pub z: Vec<f64>,
    pub featureidkey: String,
    pub colorscale: Vec<ColorStop>,
    pub showscale: bool,
    pub marker: ChoroplethMarker,
    pub hovertemplate: String,
    #[serde(default)]
    pub customdata: Vec<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Marker color: one color for the whole trace or one per point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkerColor {
    Single(String),
    PerPoint(Vec<String>),
}

impl MarkerColor {
    /// Color of the marker at `point`.
    pub fn color_at(&self, point: usize) -> Option<&str> {
        match self {
            MarkerColor::Single(color) => Some(color),
            MarkerColor::PerPoint(colors) => colors.get(point).map(String::as_str),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterMarker {
    pub color: MarkerColor,
    pub size: f64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Point markers positioned by parallel `lon`/`lat` arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterTrace {
    pub name: String,
    #[serde(default)]
    pub legendgroup: String,
    #[serde(default = "default_true")]
    pub showlegend: bool,
    #[serde(default = "default_markers_mode")]
    pub mode: String,
    pub lon: Vec<f64>,
    pub lat: Vec<f64>,
    pub marker: ScatterMarker,
    #[serde(default)]
    pub hovertemplate: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

fn default_true() -> bool {
    true
}

fn default_markers_mode() -> String {
    "markers".to_string()
}

impl ScatterTrace {
    pub fn len(&self) -> usize {
        self.lon.len().min(self.lat.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Position of the marker at `point`.
    pub fn coordinates_at(&self, point: usize) -> Option<Coordinates> {
        Some(Coordinates::new(
            *self.lon.get(point)?,
            *self.lat.get(point)?,
        ))
    }
}

// =============================================================================
// Layout
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapboxCenter {
    pub lat: f64,
    pub lon: f64,
}

impl From<Coordinates> for MapboxCenter {
    fn from(coordinates: Coordinates) -> Self {
        Self {
            lat: coordinates.lat,
            lon: coordinates.lon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapboxLayout {
    pub style: String,
    pub center: MapboxCenter,
    pub zoom: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub l: f64,
    pub r: f64,
    pub t: f64,
    pub b: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendTitle {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<LegendTitle>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapbox: Option<MapboxLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}
