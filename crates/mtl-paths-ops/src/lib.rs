//! Montreal Pedestrian Paths Operations Layer
//!
//! This crate provides the typed operations behind the dashboard: building
//! the map figure and resolving the information panel after each click. It
//! is consumed by the CLI and by whatever dispatches browser events.
//!
//! ## Architecture
//!
//! - **Requests**: typed inputs, shaped like the browser's `clickData`
//! - **Responses**: typed outputs
//! - **DashboardContext**: holds the config and the read-only datasets and
//!   executes operations
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mtl_paths_ops::{ClickData, ClickEvent, ClickRequest, Config, DashboardContext};
//!
//! fn main() -> mtl_paths_ops::OpsResult<()> {
//!     let ctx = DashboardContext::load(Config::load()?)?;
//!     let map = ctx.build_map();
//!
//!     let request = ClickRequest::new(map.figure, ctx.initial_state())
//!         .with_click(ClickData::single(ClickEvent::new(1, 0)));
//!     let response = ctx.resolve(&request)?;
//!
//!     println!("{}", response.state.title.text);
//!     Ok(())
//! }
//! ```

mod click;
mod config;
mod context;
mod data;
mod error;
mod hover;
mod interaction;
mod map;
mod requests;
mod responses;

// Re-export public API
pub use click::{map_base_clicked, map_marker_clicked, no_clicks};
pub use config::{Config, CONFIG_PATH_ENV, DEFAULT_PALETTE};
pub use context::DashboardContext;
pub use data::{
    load_neighborhoods, load_street_features, neighborhood_locations, parse_feature_collection,
};
pub use error::{OpsError, OpsResult};
pub use hover::{map_base_hover_template, map_marker_hover_template};
pub use interaction::{Interaction, InteractionKind};
pub use map::{
    add_choro_trace, add_scatter_traces, base_figure, build_map, constant_z, uniform_colorscale,
    LEGEND_TITLE,
};
pub use requests::*;
pub use responses::*;
