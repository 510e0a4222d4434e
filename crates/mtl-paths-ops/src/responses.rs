//! Response DTOs for operations.

use mtl_paths_core::{Figure, PanelState};
use serde::{Deserialize, Serialize};

use crate::interaction::InteractionKind;

/// Response from building the map figure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapResponse {
    /// The complete figure.
    pub figure: Figure,

    /// Number of neighborhoods on the base map.
    pub neighborhood_count: usize,

    /// Number of site type groups (marker traces).
    pub category_count: usize,

    /// Number of street markers.
    pub marker_count: usize,

    /// Street features dropped because they had no coordinates.
    pub skipped_features: usize,
}

/// Response from resolving an interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickResponse {
    /// Which resolution was applied.
    pub interaction: InteractionKind,

    /// The new panel state.
    pub state: PanelState,
}
