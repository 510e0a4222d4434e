//! Click command implementation.
//!
//! Resolves the panel state for an interaction and prints it as JSON or as
//! the HTML fragment the panel displays.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use askama::Template;
use mtl_paths_core::{Figure, PanelState};
use mtl_paths_ops::{ClickData, ClickEvent, ClickRequest, ClickResponse, Config, DashboardContext};
use serde::de::DeserializeOwned;

use super::OutputFormat;

/// Where the click payload comes from.
#[derive(Debug, Clone)]
pub enum ClickSource {
    /// No click yet.
    None,
    /// Explicit trace and point indices.
    Indices { curve: usize, point: usize },
    /// A browser `clickData` JSON file.
    File(PathBuf),
}

/// Inputs of the click command.
#[derive(Debug, Clone)]
pub struct ClickArgs {
    pub figure: Option<PathBuf>,
    pub click: ClickSource,
    pub state: Option<PathBuf>,
    pub format: OutputFormat,
}

/// Resolve the interaction and print the new panel state.
pub fn execute(config: Config, args: ClickArgs) -> Result<()> {
    let ctx = DashboardContext::load(config).with_context(|| "Failed to load dashboard data")?;

    let figure: Figure = match &args.figure {
        Some(path) => read_json(path)?,
        None => ctx.build_map().figure,
    };
    let click = match &args.click {
        ClickSource::None => None,
        ClickSource::Indices { curve, point } => {
            Some(ClickData::single(ClickEvent::new(*curve, *point)))
        }
        ClickSource::File(path) => Some(read_json::<ClickData>(path)?),
    };
    let state: PanelState = match &args.state {
        Some(path) => read_json(path)?,
        None => ctx.initial_state(),
    };

    let mut request = ClickRequest::new(figure, state);
    if let Some(click) = click {
        request = request.with_click(click);
    }

    let response = ctx.resolve(&request)?;

    let content = match args.format {
        OutputFormat::Json => render_json(&response)?,
        OutputFormat::Html => render_html(&response.state)?,
    };
    println!("{}", content);

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Render the response as JSON.
fn render_json(response: &ClickResponse) -> Result<String> {
    serde_json::to_string_pretty(response).with_context(|| "Failed to serialize panel state")
}

/// Render the panel as an HTML fragment.
fn render_html(state: &PanelState) -> Result<String> {
    let template = PanelTemplate {
        title: &state.title.text,
        color: state.title.color.as_deref(),
        mode: &state.mode,
        themes: &state.theme,
        visibility: state.style.visibility.as_str(),
    };
    template
        .render()
        .with_context(|| "Failed to render panel template")
}

/// Askama template for the information panel.
#[derive(Template)]
#[template(path = "panel.html")]
struct PanelTemplate<'a> {
    title: &'a str,
    color: Option<&'a str>,
    mode: &'a str,
    themes: &'a [String],
    visibility: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtl_paths_core::{PanelStyle, PanelTitle, Visibility};

    #[test]
    fn test_render_html_colored_title_and_themes() {
        let state = PanelState {
            title: PanelTitle::colored("Parc <X>", "#636EFA"),
            mode: "Permanent".into(),
            theme: vec!["A".into(), "B".into()],
            style: PanelStyle::default().with_visibility(Visibility::Visible),
        };

        let html = render_html(&state).unwrap();
        assert!(html.contains("visibility: visible"));
        assert!(html.contains("color: #636EFA"));
        assert!(html.contains("Parc &#60;X&#62;"));
        assert!(!html.contains("<X>"));
        assert!(html.contains("<li>A</li>"));
        assert!(html.contains("<li>B</li>"));
    }

    #[test]
    fn test_render_html_empty_panel() {
        let html = render_html(&PanelState::default()).unwrap();
        assert!(html.contains("visibility: hidden"));
        assert!(!html.contains("<li>"));
    }
}
