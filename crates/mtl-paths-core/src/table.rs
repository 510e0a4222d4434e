//! Flattened view of the street features used by the marker layer.

use geojson::Feature;
use serde::{Deserialize, Serialize};

use crate::geo::{
    feature_coordinates, Coordinates, StreetFeatures, PROJECT_NAME_KEY, SITE_TYPE_KEY,
};

/// Category given to features without a site type.
pub const UNKNOWN_SITE_TYPE: &str = "Unknown";

/// One row of the path table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathRecord {
    pub coordinates: Coordinates,
    pub site_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
}

impl PathRecord {
    /// Flatten a street feature.
    ///
    /// Returns `None` when the feature has no usable coordinates.
    pub fn from_feature(feature: &Feature) -> Option<Self> {
        let properties = feature.properties.as_ref();
        let coordinates = feature_coordinates(feature)?;

        let text = |key: &str| {
            properties
                .and_then(|props| props.get(key))
                .and_then(|value| value.as_str())
                .map(str::to_string)
        };

        Some(Self {
            coordinates,
            site_type: text(SITE_TYPE_KEY).unwrap_or_else(|| UNKNOWN_SITE_TYPE.to_string()),
            project_name: text(PROJECT_NAME_KEY),
        })
    }
}

/// Tabular street data, one record per usable feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathTable {
    pub records: Vec<PathRecord>,
    /// Features dropped because they had no coordinates.
    #[serde(default)]
    pub skipped: usize,
}

impl PathTable {
    pub fn new(records: Vec<PathRecord>) -> Self {
        Self {
            records,
            skipped: 0,
        }
    }

    pub fn from_features(streets: &StreetFeatures) -> Self {
        let mut table = Self::default();
        for feature in streets.iter() {
            match PathRecord::from_feature(feature) {
                Some(record) => table.records.push(record),
                None => table.skipped += 1,
            }
        }
        table
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct site types in order of first appearance.
    pub fn site_types(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.site_type.as_str()) {
                seen.push(&record.site_type);
            }
        }
        seen
    }

    /// Records grouped by site type, groups in order of first appearance and
    /// records in table order within each group.
    pub fn group_by_site_type(&self) -> Vec<(&str, Vec<&PathRecord>)> {
        self.site_types()
            .into_iter()
            .map(|site_type| {
                let rows = self
                    .records
                    .iter()
                    .filter(|record| record.site_type == site_type)
                    .collect();
                (site_type, rows)
            })
            .collect()
    }
}
