//! Core domain types shared across the Montreal pedestrian paths workspace.
//!
//! - [`geo`]: street features, coordinates and the project properties read
//!   from them.
//! - [`table`]: the flattened path table the marker layer is built from.
//! - [`panel`]: the information panel state updated by map clicks.
//! - [`figure`]: a plotly-compatible figure model (`data` + `layout`).

pub mod figure;
pub mod geo;
pub mod panel;
pub mod table;

pub use figure::{
    ChoroplethMarker, ChoroplethTrace, ColorStop, Figure, Layout, Legend, LegendTitle,
    MapboxCenter, MapboxLayout, Margin, MarkerColor, MarkerLine, ScatterMarker, ScatterTrace,
    Trace,
};
pub use geo::{
    feature_coordinates, point_coordinates, Coordinates, ProjectDetails, StreetFeatures, IMPLANTATION_MODE_KEY,
    LATITUDE_KEY, LONGITUDE_KEY, NEIGHBORHOOD_NAME_KEY, PROJECT_NAME_KEY, SITE_TYPE_KEY,
    THEMATIC_OBJECTIVES_KEY, UNKNOWN_DURATION, UNKNOWN_PROJECT,
};
pub use panel::{PanelState, PanelStyle, PanelTitle, Visibility};
pub use table::{PathRecord, PathTable, UNKNOWN_SITE_TYPE};

/// Re-exported so downstream crates share one `geojson` version.
pub use geojson;
