//! Places service configuration.

use serde_json::{Map, Value};

use super::ConfigError;

/// Default membership time-to-live in seconds (one hour).
pub const DEFAULT_MEMBERSHIP_TTL_SECS: u64 = 60 * 60;

/// Configuration key holding the list of library objects.
pub const KEY_LIBRARIES: &str = "places.libraries";
/// Key of the identifier inside each library object.
pub const KEY_LIBRARY_ID: &str = "id";
/// Configuration key holding the query endpoint host.
pub const KEY_ENDPOINT: &str = "places.endpoint";
/// Configuration key holding the membership TTL in seconds.
pub const KEY_MEMBERSHIP_TTL: &str = "places.membershipttl";

/// Validated configuration for the nearby-query service and the engine.
///
/// A value of this type always has at least one library and a non-empty
/// endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacesConfig {
    libraries: Vec<String>,
    endpoint: String,
    membership_ttl: u64,
}

impl PlacesConfig {
    /// Create a configuration from an endpoint host and library ids.
    ///
    /// Empty library ids are skipped.
    pub fn new<I, S>(endpoint: impl Into<String>, libraries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let libraries: Vec<String> = libraries
            .into_iter()
            .map(Into::into)
            .filter(|id: &String| !id.trim().is_empty())
            .collect();
        if libraries.is_empty() {
            return Err(ConfigError::NoLibraries);
        }

        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(ConfigError::NoEndpoint);
        }

        Ok(Self {
            libraries,
            endpoint,
            membership_ttl: DEFAULT_MEMBERSHIP_TTL_SECS,
        })
    }

    /// Read configuration shared by the host as flat event data, e.g.
    ///
    /// ```json
    /// {
    ///   "places.libraries": [{ "id": "lib1" }, { "id": "lib2" }],
    ///   "places.endpoint": "places.example.com",
    ///   "places.membershipttl": 600
    /// }
    /// ```
    pub fn from_event_data(data: &Map<String, Value>) -> Result<Self, ConfigError> {
        let entries = data
            .get(KEY_LIBRARIES)
            .and_then(Value::as_array)
            .ok_or(ConfigError::NoLibraries)?;

        let mut libraries = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry.get(KEY_LIBRARY_ID).and_then(Value::as_str) {
                Some(id) if !id.is_empty() => libraries.push(id.to_string()),
                _ => tracing::warn!("Skipping places library without a valid id"),
            }
        }

        let endpoint = data
            .get(KEY_ENDPOINT)
            .and_then(Value::as_str)
            .unwrap_or_default();

        let config = Self::new(endpoint, libraries)?;

        let ttl = data
            .get(KEY_MEMBERSHIP_TTL)
            .and_then(Value::as_u64)
            .unwrap_or(DEFAULT_MEMBERSHIP_TTL_SECS);

        Ok(config.with_membership_ttl(ttl))
    }

    /// Set the membership TTL in seconds.
    pub fn with_membership_ttl(mut self, secs: u64) -> Self {
        self.membership_ttl = secs;
        self
    }

    pub fn libraries(&self) -> &[String] {
        &self.libraries
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Membership TTL in seconds.
    pub fn membership_ttl(&self) -> u64 {
        self.membership_ttl
    }
}
