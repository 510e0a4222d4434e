//! Loading of the neighborhood and street datasets.

use std::path::Path;

use mtl_paths_core::geojson::{FeatureCollection, GeoJson};
use mtl_paths_core::{StreetFeatures, NEIGHBORHOOD_NAME_KEY};
use tracing::{debug, warn};

use crate::error::{OpsError, OpsResult};

/// Parse a GeoJSON document that must be a feature collection.
pub fn parse_feature_collection(contents: &str, path: &Path) -> OpsResult<FeatureCollection> {
    match contents.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        _ => Err(OpsError::NotAFeatureCollection {
            path: path.to_path_buf(),
        }),
    }
}

/// Load the neighborhood polygons drawn as the base map.
pub fn load_neighborhoods(path: &Path) -> OpsResult<FeatureCollection> {
    let contents = std::fs::read_to_string(path)?;
    let collection = parse_feature_collection(&contents, path)?;
    debug!(path = %path.display(), features = collection.features.len(), "Loaded neighborhoods");
    Ok(collection)
}

/// Load the pedestrian street features.
pub fn load_street_features(path: &Path) -> OpsResult<StreetFeatures> {
    let contents = std::fs::read_to_string(path)?;
    let collection = parse_feature_collection(&contents, path)?;
    debug!(path = %path.display(), features = collection.features.len(), "Loaded street features");
    Ok(StreetFeatures::from(collection))
}

/// Neighborhood names, in polygon order. Polygons without a name are skipped.
pub fn neighborhood_locations(neighborhoods: &FeatureCollection) -> Vec<String> {
    neighborhoods
        .features
        .iter()
        .enumerate()
        .filter_map(|(index, feature)| {
            let name = feature
                .properties
                .as_ref()
                .and_then(|props| props.get(NEIGHBORHOOD_NAME_KEY))
                .and_then(|value| value.as_str());
            if name.is_none() {
                warn!(index, "Neighborhood polygon has no {} property", NEIGHBORHOOD_NAME_KEY);
            }
            name.map(str::to_string)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const NEIGHBORHOODS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "NOM": "Verdun" },
                "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]] }
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": { "type": "Polygon", "coordinates": [[[2, 2], [3, 2], [3, 3], [2, 2]]] }
            }
        ]
    }"#;

    #[test]
    fn test_neighborhood_locations_skip_unnamed() {
        let collection = parse_feature_collection(NEIGHBORHOODS, &PathBuf::from("n.json")).unwrap();
        assert_eq!(neighborhood_locations(&collection), vec!["Verdun"]);
    }

    #[test]
    fn test_parse_rejects_single_feature() {
        let single = r#"{ "type": "Feature", "properties": {}, "geometry": null }"#;
        let err = parse_feature_collection(single, &PathBuf::from("one.json")).unwrap_err();
        assert!(matches!(err, OpsError::NotAFeatureCollection { .. }));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let err = parse_feature_collection("{ nope", &PathBuf::from("bad.json")).unwrap_err();
        assert!(matches!(err, OpsError::GeoJson(_)));
    }

    #[test]
    fn test_load_street_features_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("streets.geojson");
        std::fs::write(
            &path,
            r#"{
                "type": "FeatureCollection",
                "features": [
                    { "type": "Feature", "properties": { "NOM_PROJET": "Rue A" },
                      "geometry": { "type": "Point", "coordinates": [-73.5, 45.5] } }
                ]
            }"#,
        )
        .unwrap();

        let streets = load_street_features(&path).unwrap();
        assert_eq!(streets.len(), 1);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_neighborhoods(&PathBuf::from("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, OpsError::Io(_)));
    }
}
