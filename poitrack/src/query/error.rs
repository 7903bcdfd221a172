//! Outcome classification for nearby-place queries.

use std::fmt;

use thiserror::Error;

use crate::config::ConfigError;

/// Status code reported to the caller alongside a nearby-places result.
///
/// The numeric codes are part of the host-facing contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestStatus {
    Ok,
    /// No network capability, no connection, or the transport failed.
    ConnectivityError,
    /// Non-2xx status, empty body or undecodable body.
    ServerResponseError,
    /// The request URL could not be built from the query parameters.
    InvalidLatLongError,
    /// No valid endpoint or library configuration.
    ConfigurationError,
    UnknownError,
}

impl RequestStatus {
    pub fn code(&self) -> i64 {
        match self {
            RequestStatus::Ok => 0,
            RequestStatus::ConnectivityError => 1,
            RequestStatus::ServerResponseError => 2,
            RequestStatus::InvalidLatLongError => 3,
            RequestStatus::ConfigurationError => 4,
            RequestStatus::UnknownError => 6,
        }
    }

    /// Map a numeric code back to a status; unrecognized codes are `UnknownError`.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => RequestStatus::Ok,
            1 => RequestStatus::ConnectivityError,
            2 => RequestStatus::ServerResponseError,
            3 => RequestStatus::InvalidLatLongError,
            4 => RequestStatus::ConfigurationError,
            _ => RequestStatus::UnknownError,
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestStatus::Ok => "OK",
            RequestStatus::ConnectivityError => "CONNECTIVITY_ERROR",
            RequestStatus::ServerResponseError => "SERVER_RESPONSE_ERROR",
            RequestStatus::InvalidLatLongError => "INVALID_LATLONG_ERROR",
            RequestStatus::ConfigurationError => "CONFIGURATION_ERROR",
            RequestStatus::UnknownError => "UNKNOWN_ERROR",
        };
        write!(f, "{}", name)
    }
}

/// Batch-level failure of a nearby-places query.
///
/// Individual malformed POI entries never produce one of these; they are
/// dropped by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Connectivity error: {0}")]
    Connectivity(String),

    #[error("Server response error: {0}")]
    ServerResponse(String),

    #[error("Invalid latitude/longitude: {0}")]
    InvalidLatLong(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl QueryError {
    pub fn status(&self) -> RequestStatus {
        match self {
            QueryError::Connectivity(_) => RequestStatus::ConnectivityError,
            QueryError::ServerResponse(_) => RequestStatus::ServerResponseError,
            QueryError::InvalidLatLong(_) => RequestStatus::InvalidLatLongError,
            QueryError::Configuration(_) => RequestStatus::ConfigurationError,
            QueryError::Unknown(_) => RequestStatus::UnknownError,
        }
    }
}

impl From<ConfigError> for QueryError {
    fn from(e: ConfigError) -> Self {
        QueryError::Configuration(e.to_string())
    }
}
