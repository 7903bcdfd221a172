//! Shared setup for commands: configuration, logging and the engine.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use poitrack::config::{config_file_path, ConfigFile};
use poitrack::logging::{init_logging, LogOptions, WorkerGuard};
use poitrack::query::{QueryService, ReqwestClient};
use poitrack::store::{DataStore, JsonFileStore};
use poitrack::MembershipState;

use crate::error::CliError;

/// Owns the loaded configuration and the logging guard for one invocation.
pub struct CliRunner {
    config: ConfigFile,
    config_path: PathBuf,
    _log_guard: Option<WorkerGuard>,
}

impl CliRunner {
    /// Load configuration and install logging.
    ///
    /// A missing config file yields defaults; an unreadable one is an error.
    pub fn new(config_path: Option<&Path>, verbose: bool) -> Result<Self, CliError> {
        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(config_file_path);
        let config = load_config(&config_path)?;

        let options = LogOptions {
            verbose,
            directory: config.logging.directory.clone(),
        };
        let log_guard = init_logging(&options)?;

        Ok(Self {
            config,
            config_path,
            _log_guard: log_guard,
        })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    pub fn log_startup(&self, command: &str) {
        tracing::info!(
            command,
            version = env!("CARGO_PKG_VERSION"),
            config = %self.config_path.display(),
            state = %self.config.storage.path.display(),
            "poitrack starting"
        );
    }

    /// Open the engine on the configured state file.
    pub fn open_state(&self) -> Result<MembershipState, CliError> {
        open_state(&self.config)
    }

    pub fn query_service(&self) -> Result<QueryService, CliError> {
        let client = ReqwestClient::new()?;
        Ok(QueryService::new(Arc::new(client)))
    }
}

pub(crate) fn load_config(path: &Path) -> Result<ConfigFile, CliError> {
    if path.exists() {
        Ok(ConfigFile::load_from(path)?)
    } else {
        Ok(ConfigFile::default())
    }
}

pub(crate) fn open_state(config: &ConfigFile) -> Result<MembershipState, CliError> {
    let store: Arc<dyn DataStore> = Arc::new(JsonFileStore::open(&config.storage.path)?);
    let mut state = MembershipState::new(Some(store));
    state.set_membership_ttl(config.places.membership_ttl);
    Ok(state)
}
