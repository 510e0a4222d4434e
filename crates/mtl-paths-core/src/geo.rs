//! Street features and the project properties read from them.

use std::fmt;

use geojson::{Feature, FeatureCollection, JsonObject, Value as GeometryValue};
use serde::{Deserialize, Serialize};

// =============================================================================
// Property Keys
// =============================================================================

/// Project name of a pedestrian street.
pub const PROJECT_NAME_KEY: &str = "NOM_PROJET";
/// Implementation mode (permanent, seasonal, ...).
pub const IMPLANTATION_MODE_KEY: &str = "MODE_IMPLANTATION";
/// Newline-delimited thematic objectives.
pub const THEMATIC_OBJECTIVES_KEY: &str = "OBJECTIF_THEMATIQUE";
/// Site type used to group markers by color.
pub const SITE_TYPE_KEY: &str = "TYPE_SITE_INTERVENTION";
/// Longitude stored in the properties of a street feature.
pub const LONGITUDE_KEY: &str = "LONGITUDE";
/// Latitude stored in the properties of a street feature.
pub const LATITUDE_KEY: &str = "LATITUDE";
/// Neighborhood name on the polygons of the base map.
pub const NEIGHBORHOOD_NAME_KEY: &str = "NOM";

/// Panel title used when a feature has no project name.
pub const UNKNOWN_PROJECT: &str = "Unknown Project";
/// Panel subtitle used when a feature has no implementation mode.
pub const UNKNOWN_DURATION: &str = "Unknown Duration";

// =============================================================================
// Coordinates
// =============================================================================

/// A longitude/latitude pair, in that order (GeoJSON position order).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinates {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Build from a GeoJSON position. Only two-component positions match a
    /// clicked marker, so altitudes are rejected.
    pub fn from_position(position: &[f64]) -> Option<Self> {
        match position {
            [lon, lat] => Some(Self::new(*lon, *lat)),
            _ => None,
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lon, self.lat)
    }
}

/// Coordinates of a point feature, if its geometry is a 2D point.
pub fn point_coordinates(feature: &Feature) -> Option<Coordinates> {
    match feature.geometry.as_ref().map(|geometry| &geometry.value) {
        Some(GeometryValue::Point(position)) => Coordinates::from_position(position),
        _ => None,
    }
}

/// Coordinates a street feature is rendered at.
///
/// The `LONGITUDE`/`LATITUDE` properties win over the geometry; numeric
/// strings are accepted. Falls back to the point geometry.
pub fn feature_coordinates(feature: &Feature) -> Option<Coordinates> {
    let properties = feature.properties.as_ref();
    match (
        number_property(properties, LONGITUDE_KEY),
        number_property(properties, LATITUDE_KEY),
    ) {
        (Some(lon), Some(lat)) => Some(Coordinates::new(lon, lat)),
        _ => point_coordinates(feature),
    }
}

fn number_property(properties: Option<&JsonObject>, key: &str) -> Option<f64> {
    let value = properties?.get(key)?;
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

// =============================================================================
// Street Features
// =============================================================================

/// Read-only collection of pedestrian street features.
///
/// Loaded once and shared by reference with every click resolution.
#[derive(Debug, Clone, Default)]
pub struct StreetFeatures {
    features: Vec<Feature>,
}

impl StreetFeatures {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    /// First feature rendered exactly at `target`.
    pub fn find_by_coordinates(&self, target: Coordinates) -> Option<&Feature> {
        self.features
            .iter()
            .find(|feature| feature_coordinates(feature) == Some(target))
    }
}

impl From<FeatureCollection> for StreetFeatures {
    fn from(collection: FeatureCollection) -> Self {
        Self::new(collection.features)
    }
}

impl From<Vec<Feature>> for StreetFeatures {
    fn from(features: Vec<Feature>) -> Self {
        Self::new(features)
    }
}

// =============================================================================
// Project Details
// =============================================================================

/// The panel-facing properties of a street feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDetails {
    pub name: String,
    pub mode: String,
    pub themes: Vec<String>,
}

impl ProjectDetails {
    /// Read the project name, mode and themes, defaulting missing values.
    ///
    /// Non-string values count as missing. An empty objectives string yields
    /// no themes rather than one empty theme.
    pub fn from_properties(properties: Option<&JsonObject>) -> Self {
        let text = |key: &str| {
            properties
                .and_then(|props| props.get(key))
                .and_then(|value| value.as_str())
        };

        let themes = match text(THEMATIC_OBJECTIVES_KEY) {
            Some(objectives) if !objectives.is_empty() => {
                objectives.split('\n').map(str::to_string).collect()
            }
            _ => Vec::new(),
        };

        Self {
            name: text(PROJECT_NAME_KEY).unwrap_or(UNKNOWN_PROJECT).to_string(),
            mode: text(IMPLANTATION_MODE_KEY)
                .unwrap_or(UNKNOWN_DURATION)
                .to_string(),
            themes,
        }
    }

    pub fn from_feature(feature: &Feature) -> Self {
        Self::from_properties(feature.properties.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::Geometry;
    use serde_json::json;

    fn point(lon: f64, lat: f64, properties: serde_json::Value) -> Feature {
        Feature {
            bbox: None,
            geometry: Some(Geometry::new(GeometryValue::Point(vec![lon, lat]))),
            id: None,
            properties: properties.as_object().cloned(),
            foreign_members: None,
        }
    }

    #[test]
    fn test_find_by_coordinates_exact_match() {
        let streets = StreetFeatures::new(vec![
            point(-73.58, 45.52, json!({ "NOM_PROJET": "Rue A" })),
            point(-73.61, 45.50, json!({ "NOM_PROJET": "Rue B" })),
        ]);

        let found = streets
            .find_by_coordinates(Coordinates::new(-73.61, 45.50))
            .unwrap();
        assert_eq!(ProjectDetails::from_feature(found).name, "Rue B");
    }

    #[test]
    fn test_find_by_coordinates_has_no_tolerance() {
        let streets = StreetFeatures::new(vec![point(-73.58, 45.52, json!({}))]);
        assert!(streets
            .find_by_coordinates(Coordinates::new(-73.58, 45.520_000_1))
            .is_none());
    }

    #[test]
    fn test_find_by_coordinates_first_match_wins() {
        let streets = StreetFeatures::new(vec![
            point(-73.58, 45.52, json!({ "NOM_PROJET": "First" })),
            point(-73.58, 45.52, json!({ "NOM_PROJET": "Second" })),
        ]);
        let found = streets
            .find_by_coordinates(Coordinates::new(-73.58, 45.52))
            .unwrap();
        assert_eq!(ProjectDetails::from_feature(found).name, "First");
    }

    #[test]
    fn test_find_by_coordinates_prefers_properties_over_geometry() {
        let feature = point(
            -73.568_123_4,
            45.458_123_4,
            json!({ "NOM_PROJET": "Rue Wellington", "LONGITUDE": "-73.5681", "LATITUDE": "45.4581" }),
        );
        let streets = StreetFeatures::new(vec![feature]);

        let found = streets
            .find_by_coordinates(Coordinates::new(-73.5681, 45.4581))
            .unwrap();
        assert_eq!(ProjectDetails::from_feature(found).name, "Rue Wellington");
        assert!(streets
            .find_by_coordinates(Coordinates::new(-73.568_123_4, 45.458_123_4))
            .is_none());
    }

    #[test]
    fn test_feature_coordinates_without_geometry() {
        let feature = Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: json!({ "LONGITUDE": -73.5, "LATITUDE": 45.5 }).as_object().cloned(),
            foreign_members: None,
        };
        assert_eq!(
            feature_coordinates(&feature),
            Some(Coordinates::new(-73.5, 45.5))
        );
        assert!(StreetFeatures::new(vec![feature])
            .find_by_coordinates(Coordinates::new(-73.5, 45.5))
            .is_some());
    }

    #[test]
    fn test_feature_coordinates_falls_back_to_geometry() {
        let feature = point(-73.6, 45.4, json!({ "LONGITUDE": "n/a", "LATITUDE": 45.0 }));
        assert_eq!(
            feature_coordinates(&feature),
            Some(Coordinates::new(-73.6, 45.4))
        );
    }

    #[test]
    fn test_point_coordinates_rejects_non_points() {
        let line = Feature {
            bbox: None,
            geometry: Some(Geometry::new(GeometryValue::LineString(vec![
                vec![0.0, 0.0],
                vec![1.0, 1.0],
            ]))),
            id: None,
            properties: None,
            foreign_members: None,
        };
        assert_eq!(point_coordinates(&line), None);

        let altitude = Feature {
            geometry: Some(Geometry::new(GeometryValue::Point(vec![1.0, 2.0, 3.0]))),
            ..line
        };
        assert_eq!(point_coordinates(&altitude), None);
    }

    #[test]
    fn test_project_details_full() {
        let feature = point(
            0.0,
            0.0,
            json!({
                "NOM_PROJET": "Parc X",
                "MODE_IMPLANTATION": "Permanent",
                "OBJECTIF_THEMATIQUE": "A\nB",
            }),
        );
        let details = ProjectDetails::from_feature(&feature);
        assert_eq!(details.name, "Parc X");
        assert_eq!(details.mode, "Permanent");
        assert_eq!(details.themes, vec!["A", "B"]);
    }

    #[test]
    fn test_project_details_defaults() {
        let details = ProjectDetails::from_feature(&point(0.0, 0.0, json!({})));
        assert_eq!(details.name, UNKNOWN_PROJECT);
        assert_eq!(details.mode, UNKNOWN_DURATION);
        assert!(details.themes.is_empty());

        let no_properties = ProjectDetails::from_properties(None);
        assert_eq!(no_properties.name, UNKNOWN_PROJECT);
    }

    #[test]
    fn test_empty_objectives_yield_no_themes() {
        let feature = point(0.0, 0.0, json!({ "OBJECTIF_THEMATIQUE": "" }));
        assert!(ProjectDetails::from_feature(&feature).themes.is_empty());
    }

    #[test]
    fn test_null_properties_count_as_missing() {
        let feature = point(0.0, 0.0, json!({ "NOM_PROJET": null, "MODE_IMPLANTATION": 3 }));
        let details = ProjectDetails::from_feature(&feature);
        assert_eq!(details.name, UNKNOWN_PROJECT);
        assert_eq!(details.mode, UNKNOWN_DURATION);
    }
}
