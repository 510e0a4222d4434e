//! Hover templates for the map traces.
//!
//! `<extra></extra>` suppresses plotly's secondary box with the trace name.

const HOVER_STYLE: &str = "font-family: Oswald; font-size: 18px;";

/// Hover over a neighborhood: only its name, read from `customdata`.
pub fn map_base_hover_template() -> String {
    format!(
        "<span style=\"{}\"><b>%{{customdata}}</b></span><extra></extra>",
        HOVER_STYLE
    )
}

/// Hover over a street marker: the site type of its group.
pub fn map_marker_hover_template(name: &str) -> String {
    format!(
        "<span style=\"{}\"><b>{}</b></span><extra></extra>",
        HOVER_STYLE, name
    )
}
