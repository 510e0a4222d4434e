//! Configuration for the operations layer.

use std::path::PathBuf;

use directories::ProjectDirs;
use mtl_paths_core::{Coordinates, PanelStyle, Visibility};
use serde::{Deserialize, Serialize};

use crate::error::{OpsError, OpsResult};

/// Environment variable pointing at an explicit config file.
pub const CONFIG_PATH_ENV: &str = "MTLPATHS_CONFIG";

/// Plotly's default qualitative palette, used for the site type groups.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// Configuration for dashboard operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// GeoJSON polygons of the Montreal neighborhoods.
    #[serde(default = "default_neighborhoods_path")]
    pub neighborhoods_path: PathBuf,

    /// GeoJSON points of the pedestrian streets.
    #[serde(default = "default_streets_path")]
    pub streets_path: PathBuf,

    /// Mapbox base style.
    #[serde(default = "default_mapbox_style")]
    pub mapbox_style: String,

    /// Initial map center.
    #[serde(default = "default_center")]
    pub center: Coordinates,

    /// Initial map zoom.
    #[serde(default = "default_zoom")]
    pub zoom: f64,

    /// Size of every street marker.
    #[serde(default = "default_marker_size")]
    pub marker_size: f64,

    /// Opacity of the neighborhood polygons.
    #[serde(default = "default_basemap_opacity")]
    pub basemap_opacity: f64,

    /// Neighborhood border color.
    #[serde(default = "default_border_color")]
    pub border_color: String,

    /// Uniform fill of the neighborhood polygons.
    #[serde(default = "default_basemap_color")]
    pub basemap_color: String,

    /// Property path matching polygons to locations.
    #[serde(default = "default_feature_id_key")]
    pub feature_id_key: String,

    /// Colors cycled through the site type groups.
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,

    /// Style of the information panel before any click.
    #[serde(default = "default_panel_style")]
    pub panel_style: PanelStyle,
}

fn default_neighborhoods_path() -> PathBuf {
    PathBuf::from("assets/data/montreal.json")
}

fn default_streets_path() -> PathBuf {
    PathBuf::from("assets/data/projetpietonnisation2017.geojson")
}

fn default_mapbox_style() -> String {
    "carto-positron".to_string()
}

fn default_center() -> Coordinates {
    Coordinates::new(-73.66, 45.55)
}

fn default_zoom() -> f64 {
    9.6
}

fn default_marker_size() -> f64 {
    20.0
}

fn default_basemap_opacity() -> f64 {
    0.5
}

fn default_border_color() -> String {
    "black".to_string()
}

fn default_basemap_color() -> String {
    "#CDD1C4".to_string()
}

fn default_feature_id_key() -> String {
    "properties.NOM".to_string()
}

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
}

fn default_panel_style() -> PanelStyle {
    PanelStyle {
        visibility: Visibility::Hidden,
        position: Some("absolute".to_string()),
        top: Some("0".to_string()),
        right: Some("0".to_string()),
        width: Some("25%".to_string()),
        padding: Some("1em".to_string()),
        background_color: Some("white".to_string()),
        ..PanelStyle::default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            neighborhoods_path: default_neighborhoods_path(),
            streets_path: default_streets_path(),
            mapbox_style: default_mapbox_style(),
            center: default_center(),
            zoom: default_zoom(),
            marker_size: default_marker_size(),
            basemap_opacity: default_basemap_opacity(),
            border_color: default_border_color(),
            basemap_color: default_basemap_color(),
            feature_id_key: default_feature_id_key(),
            palette: default_palette(),
            panel_style: default_panel_style(),
        }
    }
}

impl Config {
    /// Load configuration from disk with environment overrides.
    pub fn load() -> OpsResult<Self> {
        let config = match Self::config_file_path() {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(&path)?;
                serde_json::from_str(&contents)?
            }
            _ => Self::default(),
        };

        Ok(config.with_env_overrides())
    }

    /// Apply `MTLPATHS_*` environment variables on top of this configuration.
    pub fn with_env_overrides(self) -> Self {
        Self {
            neighborhoods_path: std::env::var("MTLPATHS_NEIGHBORHOODS")
                .map(PathBuf::from)
                .unwrap_or(self.neighborhoods_path),
            streets_path: std::env::var("MTLPATHS_STREETS")
                .map(PathBuf::from)
                .unwrap_or(self.streets_path),
            mapbox_style: std::env::var("MTLPATHS_MAPBOX_STYLE").unwrap_or(self.mapbox_style),
            ..self
        }
    }

    /// Save configuration to disk.
    pub fn save(&self) -> OpsResult<()> {
        if let Some(path) = Self::config_file_path() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let contents = serde_json::to_string_pretty(self)?;
            std::fs::write(&path, contents)?;
        }
        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_file_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        ProjectDirs::from("dev", "mtl-paths", "mtlpaths")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Color of the `index`-th site type group.
    pub fn palette_color(&self, index: usize) -> &str {
        if self.palette.is_empty() {
            return DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()];
        }
        &self.palette[index % self.palette.len()]
    }

    /// Get a configuration value by key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "neighborhoods_path" => Some(self.neighborhoods_path.display().to_string()),
            "streets_path" => Some(self.streets_path.display().to_string()),
            "mapbox_style" => Some(self.mapbox_style.clone()),
            "center" => Some(format!("{},{}", self.center.lon, self.center.lat)),
            "zoom" => Some(self.zoom.to_string()),
            "marker_size" => Some(self.marker_size.to_string()),
            "basemap_opacity" => Some(self.basemap_opacity.to_string()),
            "border_color" => Some(self.border_color.clone()),
            "basemap_color" => Some(self.basemap_color.clone()),
            "feature_id_key" => Some(self.feature_id_key.clone()),
            "palette" => Some(self.palette.join(",")),
            _ => None,
        }
    }

    /// Set a configuration value by key.
    pub fn set(&mut self, key: &str, value: &str) -> OpsResult<()> {
        match key {
            "neighborhoods_path" => self.neighborhoods_path = PathBuf::from(value),
            "streets_path" => self.streets_path = PathBuf::from(value),
            "mapbox_style" => self.mapbox_style = value.to_string(),
            "center" => self.center = parse_center(value)?,
            "zoom" => self.zoom = parse_number(value)?,
            "marker_size" => self.marker_size = parse_number(value)?,
            "basemap_opacity" => {
                let opacity = parse_number(value)?;
                if !(0.0..=1.0).contains(&opacity) {
                    return Err(OpsError::Config(format!(
                        "Opacity must be between 0 and 1: {}",
                        value
                    )));
                }
                self.basemap_opacity = opacity;
            }
            "border_color" => self.border_color = value.to_string(),
            "basemap_color" => self.basemap_color = value.to_string(),
            "feature_id_key" => self.feature_id_key = value.to_string(),
            "palette" => {
                self.palette = value
                    .split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            _ => {
                return Err(OpsError::Config(format!("Unknown config key: {}", key)));
            }
        }
        Ok(())
    }

    /// All keys accepted by [`Config::get`] and [`Config::set`].
    pub fn keys() -> &'static [&'static str] {
        &[
            "neighborhoods_path",
            "streets_path",
            "mapbox_style",
            "center",
            "zoom",
            "marker_size",
            "basemap_opacity",
            "border_color",
            "basemap_color",
            "feature_id_key",
            "palette",
        ]
    }
}

fn parse_number(value: &str) -> OpsResult<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| OpsError::Config(format!("Invalid number: {}", value)))
}

fn parse_center(value: &str) -> OpsResult<Coordinates> {
    let (lon, lat) = value
        .split_once(',')
        .ok_or_else(|| OpsError::Config(format!("Expected `lon,lat`: {}", value)))?;
    Ok(Coordinates::new(parse_number(lon)?, parse_number(lat)?))
}
