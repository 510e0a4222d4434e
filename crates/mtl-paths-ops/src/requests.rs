//! Request DTOs for operations.
//!
//! Field names follow the front end's `clickData` payload so a request can be
//! deserialized straight from what the browser sends.

use mtl_paths_core::{Figure, PanelState};
use serde::{Deserialize, Serialize};

/// A click on one marker of one trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    /// Index of the trace in the figure's `data`.
    #[serde(rename = "curveNumber")]
    pub curve: usize,
    /// Index of the point within that trace.
    #[serde(rename = "pointNumber")]
    pub point: usize,
}

impl ClickEvent {
    pub fn new(curve: usize, point: usize) -> Self {
        Self { curve, point }
    }
}

/// The `clickData` payload: the points under the pointer, topmost first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickData {
    #[serde(default)]
    pub points: Vec<ClickEvent>,
}

impl ClickData {
    pub fn single(event: ClickEvent) -> Self {
        Self {
            points: vec![event],
        }
    }

    /// The point the click is attributed to.
    pub fn first(&self) -> Option<ClickEvent> {
        self.points.first().copied()
    }
}

/// Request to resolve the next panel state after an interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickRequest {
    /// The figure the click happened on.
    pub figure: Figure,

    /// The click payload, absent when nothing was clicked yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub click: Option<ClickData>,

    /// Current panel state.
    #[serde(default)]
    pub state: PanelState,
}

impl ClickRequest {
    /// Create a request with no click.
    pub fn new(figure: Figure, state: PanelState) -> Self {
        Self {
            figure,
            click: None,
            state,
        }
    }

    /// Attach the click payload.
    pub fn with_click(mut self, click: ClickData) -> Self {
        self.click = Some(click);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_click_data_reads_browser_payload() {
        let payload = json!({
            "points": [{
                "curveNumber": 2,
                "pointNumber": 5,
                "pointIndex": 5,
                "lon": -73.5,
                "lat": 45.5,
            }]
        });
        let click: ClickData = serde_json::from_value(payload).unwrap();
        assert_eq!(click.first(), Some(ClickEvent::new(2, 5)));
    }

    #[test]
    fn test_click_data_without_points() {
        let click: ClickData = serde_json::from_value(json!({})).unwrap();
        assert_eq!(click.first(), None);
    }
}
