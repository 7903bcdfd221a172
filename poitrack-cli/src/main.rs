//! Poitrack CLI - Command-line interface
//!
//! This binary hosts one membership engine backed by the configured state
//! file and exposes each engine operation as a subcommand.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use poitrack::config::config_file_path;
use poitrack::query::DEFAULT_NEARBY_COUNT;

use commands::config::ConfigCommands;
use commands::init::InitArgs;
use commands::nearby::NearbyArgs;
use error::CliError;
use runner::CliRunner;

#[derive(Debug, Parser)]
#[command(name = "poitrack")]
#[command(version, about = "Track which points of interest contain the device")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Initialize the configuration file
    Init {
        /// Places query endpoint host (e.g., places.example.com)
        #[arg(long)]
        endpoint: Option<String>,

        /// Places library id; repeat for several libraries
        #[arg(long = "library")]
        libraries: Vec<String>,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Query POIs near a location and update membership
    Nearby {
        /// Latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Maximum number of POIs to request
        #[arg(long, default_value_t = DEFAULT_NEARBY_COUNT)]
        count: usize,

        /// Print the result payload as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply a region entry or exit to a cached POI
    Region {
        /// Identifier of the POI
        region_id: String,

        /// Transition kind: entry or exit
        kind: String,

        /// Print the transition as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the shared membership snapshot as JSON
    Snapshot,

    /// List cached POIs that contain the device
    Within,

    /// Show or set the location authorization status
    Auth {
        /// denied, always, unknown, restricted or wheninuse
        status: Option<String>,
    },

    /// Show the last known location
    Location,

    /// Clear all membership state
    Reset,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.clone().unwrap_or_else(config_file_path);

    match cli.command {
        Commands::Init {
            endpoint,
            libraries,
        } => commands::init::run(
            &config_path,
            InitArgs {
                endpoint,
                libraries,
            },
        ),
        Commands::Config { command } => commands::config::run(command, &config_path),
        command => {
            let runner = CliRunner::new(Some(&config_path), cli.verbose)?;
            run_with_state(&runner, command)
        }
    }
}

fn run_with_state(runner: &CliRunner, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Nearby {
            lat,
            lon,
            count,
            json,
        } => commands::nearby::run(
            runner,
            NearbyArgs {
                latitude: lat,
                longitude: lon,
                count,
                json,
            },
        ),
        Commands::Region {
            region_id,
            kind,
            json,
        } => commands::region::run(runner, &region_id, &kind, json),
        Commands::Snapshot => commands::state::snapshot(runner),
        Commands::Within => commands::state::within(runner),
        Commands::Auth { status } => commands::state::auth(runner, status.as_deref()),
        Commands::Location => commands::state::location(runner),
        Commands::Reset => commands::state::reset(runner),
        Commands::Init { .. } | Commands::Config { .. } => Ok(()),
    }
}
