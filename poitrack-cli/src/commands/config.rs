//! Configuration management CLI commands.
//!
//! Provides `config get`, `config set`, `config list`, and `config path` commands
//! for viewing and modifying configuration settings from the command line.

use std::path::Path;

use clap::Subcommand;
use poitrack::config::{ConfigFile, ConfigKey};

use crate::error::CliError;
use crate::runner::load_config;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key in format section.key (e.g., places.endpoint)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key in format section.key (e.g., places.endpoint)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration settings
    List,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand against the file at `path`.
pub fn run(command: ConfigCommands, path: &Path) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => {
            let config = load_config(path)?;
            println!("{}", render_value(&get_value(&config, &key)?));
            Ok(())
        }
        ConfigCommands::Set { key, value } => {
            let mut config = load_config(path)?;
            let name = set_value(&mut config, &key, &value)?;
            config.save_to(path)?;
            println!("Set {} = {}", name, value);
            Ok(())
        }
        ConfigCommands::List => {
            let config = load_config(path)?;
            print!("{}", render_list(&config));
            Ok(())
        }
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        CliError::Config(format!(
            "Unknown configuration key '{}'. Use 'poitrack config list' to see available keys.",
            key
        ))
    })
}

fn get_value(config: &ConfigFile, key: &str) -> Result<String, CliError> {
    Ok(parse_key(key)?.get(config))
}

fn set_value(config: &mut ConfigFile, key: &str, value: &str) -> Result<&'static str, CliError> {
    let config_key = parse_key(key)?;
    config_key
        .set(config, value)
        .map_err(|e| CliError::Config(e.to_string()))?;
    Ok(config_key.name())
}

fn render_value(value: &str) -> &str {
    if value.is_empty() {
        "(not set)"
    } else {
        value
    }
}

/// All settings grouped by section.
fn render_list(config: &ConfigFile) -> String {
    let mut out = String::from("Configuration Settings\n======================\n\n");
    let mut current_section = "";

    for key in ConfigKey::all() {
        let section = key.section();

        if section != current_section {
            if !current_section.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("[{}]\n", section));
            current_section = section;
        }

        out.push_str(&format!(
            "  {} = {}\n",
            key.key_name(),
            render_value(&key.get(config))
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_then_get() {
        let mut config = ConfigFile::default();
        let name = set_value(&mut config, "places.endpoint", "places.example.com").unwrap();
        assert_eq!(name, "places.endpoint");
        assert_eq!(
            get_value(&config, "places.endpoint").unwrap(),
            "places.example.com"
        );
    }

    #[test]
    fn test_unknown_key() {
        let config = ConfigFile::default();
        let err = get_value(&config, "places.nothing").unwrap_err();
        assert!(err.to_string().contains("config list"));
    }

    #[test]
    fn test_invalid_value() {
        let mut config = ConfigFile::default();
        assert!(set_value(&mut config, "places.membership_ttl", "soon").is_err());
    }

    #[test]
    fn test_list_groups_sections() {
        let list = render_list(&ConfigFile::default());
        assert!(list.contains("[places]\n  endpoint = (not set)"));
        assert!(list.contains("[storage]"));
        assert!(list.contains("[logging]"));
    }

    #[test]
    fn test_set_persists_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");

        run(
            ConfigCommands::Set {
                key: "places.libraries".to_string(),
                value: "a, b".to_string(),
            },
            &path,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.places.libraries, vec!["a", "b"]);
    }
}
