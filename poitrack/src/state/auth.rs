//! Location authorization status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Location permission level granted to the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorizationStatus {
    Denied,
    Always,
    #[default]
    Unknown,
    Restricted,
    WhenInUse,
}

impl AuthorizationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorizationStatus::Denied => "denied",
            AuthorizationStatus::Always => "always",
            AuthorizationStatus::Unknown => "unknown",
            AuthorizationStatus::Restricted => "restricted",
            AuthorizationStatus::WhenInUse => "wheninuse",
        }
    }

    /// Exact, case-sensitive lookup of a status string.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "denied" => Some(AuthorizationStatus::Denied),
            "always" => Some(AuthorizationStatus::Always),
            "unknown" => Some(AuthorizationStatus::Unknown),
            "restricted" => Some(AuthorizationStatus::Restricted),
            "wheninuse" => Some(AuthorizationStatus::WhenInUse),
            _ => None,
        }
    }

    /// Lenient lookup: absent or unrecognized input is `Unknown`.
    pub fn from_optional(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or_default()
    }
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthorizationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!(
                "Unknown authorization status '{}'. Valid values: denied, always, unknown, restricted, wheninuse",
                s
            )
        })
    }
}
