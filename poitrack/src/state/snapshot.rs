//! The shared view of membership state.

use serde::Serialize;
use serde_json::{Map, Value};

use super::auth::AuthorizationStatus;
use crate::poi::Poi;

/// What the engine shares with other components.
///
/// Serializes with only the non-empty fields, plus `validuntil` which is
/// always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharedSnapshot {
    #[serde(rename = "nearbypois", skip_serializing_if = "Vec::is_empty")]
    pub nearby_pois: Vec<Poi>,
    #[serde(rename = "authstatus")]
    pub auth_status: AuthorizationStatus,
    #[serde(rename = "currentpoi", skip_serializing_if = "Option::is_none")]
    pub current_poi: Option<Poi>,
    #[serde(rename = "lastenteredpoi", skip_serializing_if = "Option::is_none")]
    pub last_entered_poi: Option<Poi>,
    #[serde(rename = "lastexitedpoi", skip_serializing_if = "Option::is_none")]
    pub last_exited_poi: Option<Poi>,
    /// Unix seconds; 0 when membership data has expired or was never set.
    #[serde(rename = "validuntil")]
    pub valid_until: i64,
}

impl SharedSnapshot {
    /// Flat event-data form.
    pub fn to_event_data(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}
