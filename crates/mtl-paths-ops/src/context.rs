//! DashboardContext - The main service for executing operations.
//!
//! The context holds configuration and the datasets loaded at startup. The
//! street features are shared read-only with every click resolution.

use std::sync::Arc;

use mtl_paths_core::geojson::FeatureCollection;
use mtl_paths_core::{PanelState, PathTable, StreetFeatures};
use tracing::{debug, info, warn};

use crate::click::{map_base_clicked, map_marker_clicked, no_clicks};
use crate::config::Config;
use crate::data::{load_neighborhoods, load_street_features};
use crate::error::OpsResult;
use crate::interaction::Interaction;
use crate::map::build_map;
use crate::requests::ClickRequest;
use crate::responses::{ClickResponse, MapResponse};

/// The main operations context.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    /// Configuration for operations.
    pub config: Config,
    neighborhoods: Arc<FeatureCollection>,
    streets: Arc<StreetFeatures>,
}

impl DashboardContext {
    /// Create a context from already loaded datasets.
    pub fn new(config: Config, neighborhoods: FeatureCollection, streets: StreetFeatures) -> Self {
        Self {
            config,
            neighborhoods: Arc::new(neighborhoods),
            streets: Arc::new(streets),
        }
    }

    /// Load both datasets from the paths in `config`.
    pub fn load(config: Config) -> OpsResult<Self> {
        let neighborhoods = load_neighborhoods(&config.neighborhoods_path)?;
        let streets = load_street_features(&config.streets_path)?;
        info!(
            neighborhoods = neighborhoods.features.len(),
            streets = streets.len(),
            "Dashboard data loaded"
        );
        Ok(Self::new(config, neighborhoods, streets))
    }

    pub fn neighborhoods(&self) -> &FeatureCollection {
        &self.neighborhoods
    }

    pub fn streets(&self) -> &StreetFeatures {
        &self.streets
    }

    /// Panel state before any interaction.
    pub fn initial_state(&self) -> PanelState {
        no_clicks(&self.config.panel_style)
    }

    // =========================================================================
    // Map Operations
    // =========================================================================

    /// Build the dashboard figure.
    pub fn build_map(&self) -> MapResponse {
        let table = PathTable::from_features(&self.streets);
        if table.skipped > 0 {
            warn!(skipped = table.skipped, "Street features without coordinates were skipped");
        }

        let figure = build_map(&self.neighborhoods, &table, &self.config);
        let category_count = figure.scatter_traces().count();
        info!(
            traces = figure.trace_count(),
            markers = table.len(),
            "Map figure built"
        );

        MapResponse {
            figure,
            neighborhood_count: self.neighborhoods.features.len(),
            category_count,
            marker_count: table.len(),
            skipped_features: table.skipped,
        }
    }

    // =========================================================================
    // Click Operations
    // =========================================================================

    /// Resolve the panel state after an interaction.
    pub fn resolve(&self, request: &ClickRequest) -> OpsResult<ClickResponse> {
        let interaction = Interaction::classify(&request.figure, request.click.as_ref());
        debug!(interaction = %interaction.kind(), "Resolving interaction");

        let state = match interaction {
            Interaction::NoClick => no_clicks(&request.state.style),
            Interaction::BaseMap => map_base_clicked(request.state.clone()),
            Interaction::Marker(event) => map_marker_clicked(
                &request.figure,
                event,
                request.state.clone(),
                &self.streets,
            )?,
        };

        Ok(ClickResponse {
            interaction: interaction.kind(),
            state,
        })
    }
}
