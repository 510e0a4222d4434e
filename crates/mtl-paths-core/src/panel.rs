//! Information panel state.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// CSS visibility of the panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Visible,
    /// Anything other than `visible` is treated as hidden.
    #[default]
    #[serde(other)]
    Hidden,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Visible => "visible",
            Visibility::Hidden => "hidden",
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, Visibility::Visible)
    }
}

/// `null` reads as hidden, like a missing or unknown value.
fn nullable_visibility<'de, D>(deserializer: D) -> Result<Visibility, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Visibility>::deserialize(deserializer)?.unwrap_or_default())
}

/// Style of the panel container, keyed the way the front end writes CSS.
///
/// Unrecognized keys are kept in `extra` so the style round-trips unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PanelStyle {
    #[serde(deserialize_with = "nullable_visibility")]
    pub visibility: Visibility,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl PanelStyle {
    /// Same style with the visibility replaced.
    pub fn with_visibility(self, visibility: Visibility) -> Self {
        Self { visibility, ..self }
    }

    pub fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }
}

/// Panel title: the project name, optionally colored like its marker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelTitle {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl PanelTitle {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    pub fn colored(text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: Some(color.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Everything the panel displays. Replaced wholesale on each interaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelState {
    #[serde(default)]
    pub title: PanelTitle,
    /// Implementation mode, shown as the subtitle.
    #[serde(default)]
    pub mode: String,
    /// Thematic objectives, rendered as a bullet list.
    #[serde(default)]
    pub theme: Vec<String>,
    #[serde(default)]
    pub style: PanelStyle,
}

impl PanelState {
    /// Empty content with the given style.
    pub fn empty(style: PanelStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn is_visible(&self) -> bool {
        self.style.is_visible()
    }
}
