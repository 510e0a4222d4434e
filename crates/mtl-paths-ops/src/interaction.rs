//! Classification of a raw click payload into the interaction it represents.

use std::fmt;

use mtl_paths_core::{Figure, Trace};
use serde::{Deserialize, Serialize};

use crate::requests::{ClickData, ClickEvent};

/// What part of the map the user interacted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// No click has happened yet.
    NoClick,
    /// The neighborhood base map was clicked.
    BaseMap,
    /// A street marker was clicked.
    Marker(ClickEvent),
}

impl Interaction {
    /// Classify `click` against the figure it happened on.
    ///
    /// Clicks on a choropleth trace are base map clicks. Anything else,
    /// including indices the figure does not have, is treated as a marker
    /// click and validated when the marker is resolved.
    pub fn classify(figure: &Figure, click: Option<&ClickData>) -> Self {
        let Some(event) = click.and_then(ClickData::first) else {
            return Interaction::NoClick;
        };

        match figure.trace(event.curve) {
            Some(Trace::Choroplethmapbox(_)) => Interaction::BaseMap,
            _ => Interaction::Marker(event),
        }
    }

    pub fn kind(&self) -> InteractionKind {
        match self {
            Interaction::NoClick => InteractionKind::NoClick,
            Interaction::BaseMap => InteractionKind::BaseMap,
            Interaction::Marker(_) => InteractionKind::Marker,
        }
    }
}

/// Payload-free tag of an [`Interaction`], for responses and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    NoClick,
    BaseMap,
    Marker,
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractionKind::NoClick => write!(f, "no_click"),
            InteractionKind::BaseMap => write!(f, "base_map"),
            InteractionKind::Marker => write!(f, "marker"),
        }
    }
}
