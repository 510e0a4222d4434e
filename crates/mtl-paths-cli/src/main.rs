//! mtlpaths - Montreal pedestrian paths dashboard CLI.
//!
//! Builds the map figure from the neighborhood and street datasets and
//! resolves the information panel for a click on that figure.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use mtl_paths_ops::Config;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

mod commands;

use commands::{click, config as config_cmd, figure, OutputFormat};

/// Montreal pedestrian paths dashboard.
#[derive(Parser, Debug)]
#[command(
    name = "mtlpaths",
    author,
    version,
    about = "Build the pedestrian paths map and resolve panel clicks",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Dataset locations, overriding the configuration.
#[derive(Args, Debug, Clone)]
struct DataArgs {
    /// GeoJSON polygons of the neighborhoods.
    #[arg(long)]
    neighborhoods: Option<PathBuf>,

    /// GeoJSON points of the pedestrian streets.
    #[arg(long)]
    streets: Option<PathBuf>,
}

impl DataArgs {
    fn apply(self, config: Config) -> Config {
        Config {
            neighborhoods_path: self.neighborhoods.unwrap_or(config.neighborhoods_path),
            streets_path: self.streets.unwrap_or(config.streets_path),
            ..config
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the map figure as plotly JSON.
    Figure {
        #[command(flatten)]
        data: DataArgs,

        /// Output file (defaults to stdout).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON.
        #[arg(long)]
        pretty: bool,
    },

    /// Resolve the panel state after an interaction.
    ///
    /// Without a click payload this is the initial, hidden panel. A click on
    /// the base map keeps the panel as it is; a click on a marker shows the
    /// project of the street under it.
    Click {
        #[command(flatten)]
        data: DataArgs,

        /// Figure JSON the click happened on (built from the data if omitted).
        #[arg(long)]
        figure: Option<PathBuf>,

        /// Browser `clickData` payload as a JSON file.
        #[arg(long, conflicts_with_all = ["curve", "point"])]
        click_data: Option<PathBuf>,

        /// Index of the clicked trace.
        #[arg(long, requires = "point")]
        curve: Option<usize>,

        /// Index of the clicked point within the trace.
        #[arg(long, requires = "curve")]
        point: Option<usize>,

        /// Current panel state as a JSON file.
        #[arg(long)]
        state: Option<PathBuf>,

        /// Output format: json or html.
        #[arg(short, long, default_value = "json")]
        format: String,
    },

    /// Manage configuration.
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration.
    Show,

    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,
        /// Configuration value.
        value: String,
    },

    /// Get a configuration value.
    Get {
        /// Configuration key.
        key: String,
    },

    /// Reset configuration to defaults.
    Reset,

    /// Show path to config file.
    Path,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    // stdout carries the JSON output, so logs go to stderr
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;

    match cli.command {
        Commands::Figure {
            data,
            output,
            pretty,
        } => {
            figure::execute(data.apply(config), output, pretty)?;
        }

        Commands::Click {
            data,
            figure,
            click_data,
            curve,
            point,
            state,
            format,
        } => {
            let format: OutputFormat = format.parse()?;
            let click = match (curve, point) {
                (Some(curve), Some(point)) => click::ClickSource::Indices { curve, point },
                _ => match click_data {
                    Some(path) => click::ClickSource::File(path),
                    None => click::ClickSource::None,
                },
            };
            let args = click::ClickArgs {
                figure,
                click,
                state,
                format,
            };
            click::execute(data.apply(config), args)?;
        }

        Commands::Config(config_cmd_inner) => {
            let mut config = config;
            match config_cmd_inner {
                ConfigCommands::Show => {
                    config_cmd::show(&config)?;
                }
                ConfigCommands::Set { key, value } => {
                    config_cmd::set(&mut config, &key, &value)?;
                }
                ConfigCommands::Get { key } => {
                    config_cmd::get(&config, &key)?;
                }
                ConfigCommands::Reset => {
                    config_cmd::reset()?;
                }
                ConfigCommands::Path => {
                    if let Some(path) = Config::config_file_path() {
                        println!("{}", path.display());
                    } else {
                        println!("(no config file path available)");
                    }
                }
            }
        }
    }

    Ok(())
}
