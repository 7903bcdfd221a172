//! Configuration.
//!
//! Two layers:
//!
//! - [`PlacesConfig`]: the validated settings the query service and the
//!   membership engine need (libraries, endpoint, membership TTL). It can be
//!   read from the flat event data a host shares, or from the INI file.
//! - [`ConfigFile`]: the on-disk INI file used by the CLI.

mod file;
mod places;

use std::path::PathBuf;

use thiserror::Error;

pub use file::{
    config_file_path, default_state_path, ConfigFile, ConfigKey, LoggingSection, PlacesSection,
    StorageSection,
};
pub use places::{
    PlacesConfig, DEFAULT_MEMBERSHIP_TTL_SECS, KEY_ENDPOINT, KEY_LIBRARIES, KEY_LIBRARY_ID,
    KEY_MEMBERSHIP_TTL,
};

/// Errors raised while reading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No valid places libraries configured")]
    NoLibraries,

    #[error("No places endpoint configured")]
    NoEndpoint,

    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },

    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    #[error("Failed to read {}: {reason}", path.display())]
    Read { path: PathBuf, reason: String },

    #[error("Failed to write {}: {reason}", path.display())]
    Write { path: PathBuf, reason: String },
}
