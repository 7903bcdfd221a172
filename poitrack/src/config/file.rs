//! INI configuration file.
//!
//! ```ini
//! [places]
//! endpoint = places.example.com
//! libraries = lib1, lib2
//! membership_ttl = 3600
//!
//! [storage]
//! path = /home/user/.local/share/poitrack/state.json
//!
//! [logging]
//! directory = /home/user/.local/share/poitrack/logs
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;

use super::places::{PlacesConfig, DEFAULT_MEMBERSHIP_TTL_SECS};
use super::ConfigError;

const APP_DIR: &str = "poitrack";
const CONFIG_FILE_NAME: &str = "config.ini";
const STATE_FILE_NAME: &str = "state.json";

/// Path of the configuration file.
///
/// `<config_dir>/poitrack/config.ini`, falling back to the working
/// directory when the platform has no config directory.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILE_NAME)
}

/// Default location of the persisted state file.
pub fn default_state_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(STATE_FILE_NAME)
}

/// `[places]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacesSection {
    pub endpoint: Option<String>,
    pub libraries: Vec<String>,
    pub membership_ttl: u64,
}

impl Default for PlacesSection {
    fn default() -> Self {
        Self {
            endpoint: None,
            libraries: Vec::new(),
            membership_ttl: DEFAULT_MEMBERSHIP_TTL_SECS,
        }
    }
}

/// `[storage]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageSection {
    pub path: PathBuf,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            path: default_state_path(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingSection {
    /// Directory for rolling log files; stderr only when unset.
    pub directory: Option<PathBuf>,
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub places: PlacesSection,
    pub storage: StorageSection,
    pub logging: LoggingSection,
}

impl ConfigFile {
    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from `path`. Missing keys keep their defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut config = ConfigFile::default();

        if let Some(section) = ini.section(Some("places")) {
            if let Some(endpoint) = section.get("endpoint") {
                let endpoint = endpoint.trim();
                if !endpoint.is_empty() {
                    config.places.endpoint = Some(endpoint.to_string());
                }
            }
            if let Some(libraries) = section.get("libraries") {
                config.places.libraries = parse_list(libraries);
            }
            if let Some(ttl) = section.get("membership_ttl") {
                config.places.membership_ttl = parse_ttl(ttl)?;
            }
        }

        if let Some(section) = ini.section(Some("storage")) {
            if let Some(path) = section.get("path") {
                config.storage.path = PathBuf::from(path.trim());
            }
        }

        if let Some(section) = ini.section(Some("logging")) {
            if let Some(dir) = section.get("directory") {
                let dir = dir.trim();
                if !dir.is_empty() {
                    config.logging.directory = Some(PathBuf::from(dir));
                }
            }
        }

        Ok(config)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Save to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let mut ini = Ini::new();

        ini.with_section(Some("places"))
            .set(
                "endpoint",
                self.places.endpoint.clone().unwrap_or_default(),
            )
            .set("libraries", self.places.libraries.join(", "))
            .set("membership_ttl", self.places.membership_ttl.to_string());

        ini.with_section(Some("storage"))
            .set("path", self.storage.path.to_string_lossy().to_string());

        ini.with_section(Some("logging")).set(
            "directory",
            self.logging
                .directory
                .as_ref()
                .map(|d| d.to_string_lossy().to_string())
                .unwrap_or_default(),
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.to_path_buf(),
                reason: e.to_string(),
            })?;
        }

        ini.write_to_file(path).map_err(|e| ConfigError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Build the validated places configuration from this file.
    pub fn places_config(&self) -> Result<PlacesConfig, ConfigError> {
        let endpoint = self.places.endpoint.clone().unwrap_or_default();
        Ok(PlacesConfig::new(endpoint, self.places.libraries.iter().cloned())?
            .with_membership_ttl(self.places.membership_ttl))
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_ttl(value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            key: "places.membership_ttl".to_string(),
            value: value.to_string(),
        })
}

/// Keys addressable from the command line as `section.key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    PlacesEndpoint,
    PlacesLibraries,
    PlacesMembershipTtl,
    StoragePath,
    LoggingDirectory,
}

impl ConfigKey {
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::PlacesEndpoint,
            ConfigKey::PlacesLibraries,
            ConfigKey::PlacesMembershipTtl,
            ConfigKey::StoragePath,
            ConfigKey::LoggingDirectory,
        ]
    }

    /// Full `section.key` name.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::PlacesEndpoint => "places.endpoint",
            ConfigKey::PlacesLibraries => "places.libraries",
            ConfigKey::PlacesMembershipTtl => "places.membership_ttl",
            ConfigKey::StoragePath => "storage.path",
            ConfigKey::LoggingDirectory => "logging.directory",
        }
    }

    pub fn section(&self) -> &'static str {
        self.name().split_once('.').map(|(s, _)| s).unwrap_or("")
    }

    pub fn key_name(&self) -> &'static str {
        self.name().split_once('.').map(|(_, k)| k).unwrap_or("")
    }

    /// Current value rendered as text; empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::PlacesEndpoint => config.places.endpoint.clone().unwrap_or_default(),
            ConfigKey::PlacesLibraries => config.places.libraries.join(", "),
            ConfigKey::PlacesMembershipTtl => config.places.membership_ttl.to_string(),
            ConfigKey::StoragePath => config.storage.path.to_string_lossy().to_string(),
            ConfigKey::LoggingDirectory => config
                .logging
                .directory
                .as_ref()
                .map(|d| d.to_string_lossy().to_string())
                .unwrap_or_default(),
        }
    }

    /// Update `config` from text.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let trimmed = value.trim();
        match self {
            ConfigKey::PlacesEndpoint => {
                config.places.endpoint = (!trimmed.is_empty()).then(|| trimmed.to_string());
            }
            ConfigKey::PlacesLibraries => config.places.libraries = parse_list(trimmed),
            ConfigKey::PlacesMembershipTtl => config.places.membership_ttl = parse_ttl(trimmed)?,
            ConfigKey::StoragePath => {
                if trimmed.is_empty() {
                    return Err(ConfigError::InvalidValue {
                        key: self.name().to_string(),
                        value: value.to_string(),
                    });
                }
                config.storage.path = PathBuf::from(trimmed);
            }
            ConfigKey::LoggingDirectory => {
                config.logging.directory = (!trimmed.is_empty()).then(|| PathBuf::from(trimmed));
            }
        }
        Ok(())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == s)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}
