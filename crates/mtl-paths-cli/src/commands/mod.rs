//! CLI command implementations.

pub mod click;
pub mod config;
pub mod figure;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Html,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "html" => Ok(Self::Html),
            _ => anyhow::bail!("Unknown format: {}. Use 'json' or 'html'", s),
        }
    }
}
