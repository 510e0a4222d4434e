//! Panel updates for the three kinds of map interaction.
//!
//! Every function returns a complete new [`PanelState`]; nothing is updated
//! in place.

use mtl_paths_core::{
    Figure, PanelState, PanelStyle, PanelTitle, ProjectDetails, StreetFeatures, Trace, Visibility,
};
use tracing::{debug, warn};

use crate::error::{OpsError, OpsResult};
use crate::requests::ClickEvent;

/// Nothing was clicked: empty panel, hidden.
pub fn no_clicks(style: &PanelStyle) -> PanelState {
    PanelState::empty(style.clone().with_visibility(Visibility::Hidden))
}

/// The base map was clicked, not a marker.
///
/// An open panel stays as it is; a hidden one stays hidden.
pub fn map_base_clicked(state: PanelState) -> PanelState {
    if state.style.is_visible() {
        return state;
    }
    PanelState {
        style: state.style.with_visibility(Visibility::Hidden),
        ..state
    }
}

/// A marker was clicked: show the project of the street under it.
///
/// The marker position is looked up in `streets` by exact coordinate
/// equality. The title takes the marker's own color.
pub fn map_marker_clicked(
    figure: &Figure,
    event: ClickEvent,
    state: PanelState,
    streets: &StreetFeatures,
) -> OpsResult<PanelState> {
    let ClickEvent { curve, point } = event;

    let trace = figure.trace(curve).ok_or(OpsError::CurveOutOfRange {
        curve,
        trace_count: figure.trace_count(),
    })?;
    let marker_data = match trace {
        Trace::Scattermapbox(scatter) => scatter,
        other => {
            return Err(OpsError::NotAMarkerTrace {
                curve,
                kind: other.kind(),
            })
        }
    };

    let coordinates = marker_data
        .coordinates_at(point)
        .ok_or(OpsError::PointOutOfRange {
            curve,
            point,
            len: marker_data.len(),
        })?;

    let feature = streets.find_by_coordinates(coordinates).ok_or_else(|| {
        warn!(%coordinates, curve, point, "Clicked marker has no matching feature");
        OpsError::FeatureNotFound { coordinates }
    })?;

    let details = ProjectDetails::from_feature(feature);
    debug!(project = %details.name, themes = details.themes.len(), "Marker resolved");

    let title = match marker_data.marker.color.color_at(point) {
        Some(color) => PanelTitle::colored(details.name, color),
        None => PanelTitle::plain(details.name),
    };

    Ok(PanelState {
        title,
        mode: details.mode,
        theme: details.themes,
        style: state.style.with_visibility(Visibility::Visible),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use mtl_paths_core::geojson::{Feature, Geometry, Value as GeometryValue};
    use mtl_paths_core::{
        ChoroplethMarker, ChoroplethTrace, Coordinates, MarkerColor, MarkerLine, ScatterMarker,
        ScatterTrace, UNKNOWN_DURATION, UNKNOWN_PROJECT,
    };
    use serde_json::json;

    fn street(lon: f64, lat: f64, properties: serde_json::Value) -> Feature {
        Feature {
            bbox: None,
            geometry: Some(Geometry::new(GeometryValue::Point(vec![lon, lat]))),
            id: None,
            properties: properties.as_object().cloned(),
            foreign_members: None,
        }
    }

    fn choropleth() -> Trace {
        Trace::Choroplethmapbox(ChoroplethTrace {
            geojson: mtl_paths_core::geojson::FeatureCollection {
                bbox: None,
                features: vec![],
                foreign_members: None,
            },
            locations: vec![],
            z: vec![],
            featureidkey: "properties.NOM".into(),
            colorscale: vec![],
            showscale: false,
            marker: ChoroplethMarker {
                line: MarkerLine {
                    color: "black".into(),
                },
                opacity: 0.5,
            },
            hovertemplate: String::new(),
            customdata: vec![],
            extra: BTreeMap::new(),
        })
    }

    fn markers(color: &str, points: &[(f64, f64)]) -> Trace {
        Trace::Scattermapbox(ScatterTrace {
            name: "Rue".into(),
            legendgroup: "Rue".into(),
            showlegend: true,
            mode: "markers".into(),
            lon: points.iter().map(|p| p.0).collect(),
            lat: points.iter().map(|p| p.1).collect(),
            marker: ScatterMarker {
                color: MarkerColor::Single(color.into()),
                size: 20.0,
                extra: BTreeMap::new(),
            },
            hovertemplate: String::new(),
            extra: BTreeMap::new(),
        })
    }

    fn figure() -> Figure {
        let mut figure = Figure::default();
        figure.add_trace(choropleth());
        figure.add_trace(markers("#636EFA", &[(-73.57, 45.52), (-73.60, 45.49)]));
        figure
    }

    fn styled(visibility: Visibility) -> PanelStyle {
        PanelStyle {
            width: Some("25%".into()),
            position: Some("absolute".into()),
            ..PanelStyle::default()
        }
        .with_visibility(visibility)
    }

    fn open_panel() -> PanelState {
        PanelState {
            title: PanelTitle::colored("Rue A", "red"),
            mode: "Saisonnier".into(),
            theme: vec!["Verdir".into()],
            style: styled(Visibility::Visible),
        }
    }

    #[test]
    fn test_no_clicks_clears_and_hides() {
        for visibility in [Visibility::Visible, Visibility::Hidden] {
            let state = no_clicks(&styled(visibility));
            assert!(state.title.is_empty());
            assert!(state.mode.is_empty());
            assert!(state.theme.is_empty());
            assert_eq!(state.style.visibility, Visibility::Hidden);
            assert_eq!(state.style.width.as_deref(), Some("25%"));
        }
    }

    #[test]
    fn test_map_base_clicked_keeps_open_panel() {
        let state = open_panel();
        assert_eq!(map_base_clicked(state.clone()), state);
    }

    #[test]
    fn test_map_base_clicked_keeps_hidden_panel_hidden() {
        let state = PanelState {
            style: styled(Visibility::Hidden),
            ..open_panel()
        };
        let next = map_base_clicked(state.clone());
        assert_eq!(next.title, state.title);
        assert_eq!(next.mode, state.mode);
        assert_eq!(next.theme, state.theme);
        assert_eq!(next.style.visibility, Visibility::Hidden);
        assert_eq!(map_base_clicked(next.clone()), next);
    }

    #[test]
    fn test_map_marker_clicked_shows_project() {
        let streets = StreetFeatures::new(vec![
            street(-73.57, 45.52, json!({ "NOM_PROJET": "Other" })),
            street(
                -73.60,
                45.49,
                json!({
                    "NOM_PROJET": "Parc X",
                    "MODE_IMPLANTATION": "Permanent",
                    "OBJECTIF_THEMATIQUE": "A\nB",
                }),
            ),
        ]);

        let state = map_marker_clicked(
            &figure(),
            ClickEvent::new(1, 1),
            no_clicks(&styled(Visibility::Hidden)),
            &streets,
        )
        .unwrap();

        assert_eq!(state.title, PanelTitle::colored("Parc X", "#636EFA"));
        assert_eq!(state.mode, "Permanent");
        assert_eq!(state.theme, vec!["A", "B"]);
        assert!(state.is_visible());
        assert_eq!(state.style.width.as_deref(), Some("25%"));
    }

    #[test]
    fn test_map_marker_clicked_defaults_missing_properties() {
        let streets = StreetFeatures::new(vec![street(
            -73.57,
            45.52,
            json!({ "OBJECTIF_THEMATIQUE": "" }),
        )]);

        let state =
            map_marker_clicked(&figure(), ClickEvent::new(1, 0), open_panel(), &streets).unwrap();
        assert_eq!(state.title.text, UNKNOWN_PROJECT);
        assert_eq!(state.mode, UNKNOWN_DURATION);
        assert!(state.theme.is_empty());
    }

    #[test]
    fn test_map_marker_clicked_feature_not_found() {
        let streets = StreetFeatures::new(vec![street(0.0, 0.0, json!({}))]);
        let err = map_marker_clicked(&figure(), ClickEvent::new(1, 0), open_panel(), &streets)
            .unwrap_err();

        match err {
            OpsError::FeatureNotFound { coordinates } => {
                assert_eq!(coordinates, Coordinates::new(-73.57, 45.52));
            }
            other => panic!("Expected FeatureNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_map_marker_clicked_per_point_color() {
        let mut figure = figure();
        if let Trace::Scattermapbox(scatter) = &mut figure.data[1] {
            scatter.marker.color = MarkerColor::PerPoint(vec!["red".into(), "green".into()]);
        }
        let streets = StreetFeatures::new(vec![street(-73.60, 45.49, json!({}))]);

        let state =
            map_marker_clicked(&figure, ClickEvent::new(1, 1), open_panel(), &streets).unwrap();
        assert_eq!(state.title.color.as_deref(), Some("green"));
    }

    #[test]
    fn test_map_marker_clicked_rejects_bad_indices() {
        let streets = StreetFeatures::default();
        let figure = figure();

        assert!(matches!(
            map_marker_clicked(&figure, ClickEvent::new(5, 0), open_panel(), &streets),
            Err(OpsError::CurveOutOfRange {
                curve: 5,
                trace_count: 2
            })
        ));
        assert!(matches!(
            map_marker_clicked(&figure, ClickEvent::new(0, 0), open_panel(), &streets),
            Err(OpsError::NotAMarkerTrace { curve: 0, .. })
        ));
        assert!(matches!(
            map_marker_clicked(&figure, ClickEvent::new(1, 9), open_panel(), &streets),
            Err(OpsError::PointOutOfRange { len: 2, .. })
        ));
    }
}
