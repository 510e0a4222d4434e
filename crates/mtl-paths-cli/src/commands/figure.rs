//! Figure command implementation.
//!
//! Builds the dashboard figure and writes it as plotly JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use mtl_paths_ops::{Config, DashboardContext};
use tracing::info;

/// Build the figure and write it to `output` or stdout.
pub fn execute(config: Config, output: Option<PathBuf>, pretty: bool) -> Result<()> {
    let ctx = DashboardContext::load(config).with_context(|| "Failed to load dashboard data")?;
    let map = ctx.build_map();

    let content = if pretty {
        serde_json::to_string_pretty(&map.figure)
    } else {
        serde_json::to_string(&map.figure)
    }
    .with_context(|| "Failed to serialize figure to JSON")?;

    let Some(output_path) = output else {
        println!("{}", content);
        return Ok(());
    };

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    std::fs::write(&output_path, content)
        .with_context(|| format!("Failed to write figure to: {}", output_path.display()))?;

    info!(path = %output_path.display(), "Figure written");
    println!("Figure written to: {}", output_path.display());
    println!(
        "  {} neighborhoods, {} site types, {} markers",
        map.neighborhood_count, map.category_count, map.marker_count
    );
    if map.skipped_features > 0 {
        println!("  {} features skipped (no coordinates)", map.skipped_features);
    }

    Ok(())
}
