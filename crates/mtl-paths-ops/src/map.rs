//! Map figure construction: a grey neighborhood base map and one marker trace
//! per site type.

use std::collections::BTreeMap;

use mtl_paths_core::geojson::FeatureCollection;
use mtl_paths_core::{
    ChoroplethMarker, ChoroplethTrace, ColorStop, Figure, Layout, Legend, LegendTitle,
    MapboxLayout, Margin, MarkerColor, MarkerLine, PathTable, ScatterMarker, ScatterTrace, Trace,
};
use tracing::debug;

use crate::config::Config;
use crate::hover::{map_base_hover_template, map_marker_hover_template};

/// Legend heading of the marker groups.
pub const LEGEND_TITLE: &str = "Type de site";

/// Empty figure with the configured mapbox layout.
pub fn base_figure(config: &Config) -> Figure {
    Figure::new(Layout {
        mapbox: Some(MapboxLayout {
            style: config.mapbox_style.clone(),
            center: config.center.into(),
            zoom: config.zoom,
        }),
        margin: Some(Margin::default()),
        showlegend: Some(true),
        legend: Some(Legend {
            title: Some(LegendTitle {
                text: LEGEND_TITLE.to_string(),
            }),
            extra: BTreeMap::new(),
        }),
        extra: BTreeMap::new(),
    })
}

/// Constant z-values: with a single-color scale every polygon gets the same fill.
pub fn constant_z(count: usize) -> Vec<f64> {
    vec![1.0; count]
}

/// Two-stop colorscale of a single color.
pub fn uniform_colorscale(color: &str) -> Vec<ColorStop> {
    vec![
        ColorStop(0.0, color.to_string()),
        ColorStop(1.0, color.to_string()),
    ]
}

/// Append the neighborhood base map as one choropleth trace.
///
/// The polygons are only a backdrop: the z-values and colorscale are expected
/// to be constant so every neighborhood renders in the same neutral color.
pub fn add_choro_trace<'f>(
    fig: &'f mut Figure,
    neighborhoods: &FeatureCollection,
    locations: &[String],
    z: &[f64],
    colorscale: &[ColorStop],
    config: &Config,
) -> &'f mut Figure {
    fig.add_trace(Trace::Choroplethmapbox(ChoroplethTrace {
        geojson: neighborhoods.clone(),
        locations: locations.to_vec(),
        z: z.to_vec(),
        featureidkey: config.feature_id_key.clone(),
        colorscale: colorscale.to_vec(),
        showscale: false,
        marker: ChoroplethMarker {
            line: MarkerLine {
                color: config.border_color.clone(),
            },
            opacity: config.basemap_opacity,
        },
        hovertemplate: map_base_hover_template(),
        customdata: locations.to_vec(),
        extra: BTreeMap::new(),
    }))
}

/// Append one marker trace per site type, in order of first appearance.
pub fn add_scatter_traces<'f>(
    fig: &'f mut Figure,
    table: &PathTable,
    config: &Config,
) -> &'f mut Figure {
    let traces: Vec<Trace> = table
        .group_by_site_type()
        .into_iter()
        .enumerate()
        .map(|(index, (site_type, records))| {
            debug!(site_type, markers = records.len(), "Adding marker trace");
            Trace::Scattermapbox(ScatterTrace {
                name: site_type.to_string(),
                legendgroup: site_type.to_string(),
                showlegend: true,
                mode: "markers".to_string(),
                lon: records.iter().map(|r| r.coordinates.lon).collect(),
                lat: records.iter().map(|r| r.coordinates.lat).collect(),
                marker: ScatterMarker {
                    color: MarkerColor::Single(config.palette_color(index).to_string()),
                    size: config.marker_size,
                    extra: BTreeMap::new(),
                },
                hovertemplate: map_marker_hover_template(site_type),
                extra: BTreeMap::new(),
            })
        })
        .collect();

    fig.add_traces(traces)
}

/// Build the complete dashboard figure.
pub fn build_map(neighborhoods: &FeatureCollection, table: &PathTable, config: &Config) -> Figure {
    let locations = crate::data::neighborhood_locations(neighborhoods);
    let z = constant_z(locations.len());
    let colorscale = uniform_colorscale(&config.basemap_color);

    let mut fig = base_figure(config);
    add_choro_trace(&mut fig, neighborhoods, &locations, &z, &colorscale, config);
    add_scatter_traces(&mut fig, table, config);
    fig
}
