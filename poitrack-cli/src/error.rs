//! CLI error type.

use std::fmt;

use poitrack::config::ConfigError;
use poitrack::logging::LoggingError;
use poitrack::query::{HttpError, QueryError};
use poitrack::store::StoreError;

/// Errors surfaced to the user. Every variant exits with status 1.
#[derive(Debug)]
pub enum CliError {
    /// Invalid or incomplete configuration.
    Config(String),
    /// The state file could not be opened.
    Store(StoreError),
    /// The HTTP client could not be created.
    Http(HttpError),
    /// A nearby query failed.
    Query(QueryError),
    /// Logging could not be set up.
    Logging(LoggingError),
    /// Output could not be rendered.
    Output(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        1
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Store(e) => write!(f, "State store error: {}", e),
            CliError::Http(e) => write!(f, "{}", e),
            CliError::Query(e) => write!(f, "{} (status {})", e, e.status().code()),
            CliError::Logging(e) => write!(f, "Logging error: {}", e),
            CliError::Output(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        CliError::Store(e)
    }
}

impl From<HttpError> for CliError {
    fn from(e: HttpError) -> Self {
        CliError::Http(e)
    }
}

impl From<QueryError> for CliError {
    fn from(e: QueryError) -> Self {
        CliError::Query(e)
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e.to_string())
    }
}
