//! Init command - initialize configuration file.

use std::path::Path;

use poitrack::config::ConfigFile;

use crate::error::CliError;
use crate::runner::load_config;

/// Arguments for the init command.
#[derive(Debug, Default)]
pub struct InitArgs {
    pub endpoint: Option<String>,
    pub libraries: Vec<String>,
}

/// Run the init command.
pub fn run(path: &Path, args: InitArgs) -> Result<(), CliError> {
    let config = apply(load_config(path)?, args);
    config.save_to(path)?;

    println!("Configuration file: {}", path.display());
    println!("State file:         {}", config.storage.path.display());
    println!();

    match config.places_config() {
        Ok(places) => println!(
            "Places endpoint {} with {} librar{}.",
            places.endpoint(),
            places.libraries().len(),
            if places.libraries().len() == 1 { "y" } else { "ies" }
        ),
        Err(e) => {
            println!("Places service is not configured yet: {}.", e);
            println!("Use --endpoint and --library, or 'poitrack config set'.");
        }
    }
    Ok(())
}

/// Fill in values given on the command line. Existing values are kept
/// unless overridden.
fn apply(mut config: ConfigFile, args: InitArgs) -> ConfigFile {
    if let Some(endpoint) = args.endpoint.filter(|e| !e.trim().is_empty()) {
        config.places.endpoint = Some(endpoint.trim().to_string());
    }

    let libraries: Vec<String> = args
        .libraries
        .iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();
    if !libraries.is_empty() {
        config.places.libraries = libraries;
    }

    config
}
