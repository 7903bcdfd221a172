//! Nearby-query response parser.
//!
//! The server answers with a compact positional format:
//!
//! ```json
//! { "places": {
//!     "userWithin": [ { "p": [id, name, lat, lon, radius, library, weight], "x": { ... } } ],
//!     "pois":       [ { "p": [...], "x": { ... } } ]
//! } }
//! ```
//!
//! Only the top level can fail the batch. A malformed entry is logged and
//! skipped so one bad POI never hides the rest.

use serde_json::Value;

use super::error::QueryError;
use crate::poi::{flatten_metadata, Poi, DEFAULT_POI_RADIUS, DEFAULT_POI_WEIGHT};

const KEY_PLACES: &str = "places";
const KEY_USER_WITHIN: &str = "userWithin";
const KEY_POIS: &str = "pois";
const KEY_DETAILS: &str = "p";
const KEY_METADATA: &str = "x";

/// Number of elements in a POI detail array.
pub const POI_DETAIL_LENGTH: usize = 7;

const INDEX_IDENTIFIER: usize = 0;
const INDEX_NAME: usize = 1;
const INDEX_LATITUDE: usize = 2;
const INDEX_LONGITUDE: usize = 3;
const INDEX_RADIUS: usize = 4;
const INDEX_LIBRARY: usize = 5;
const INDEX_WEIGHT: usize = 6;

const UNNAMED: &str = "unnamed";

/// The two classified lists produced by a successful parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NearbyPois {
    /// POIs the device is inside (`contains_device == true`), in server order.
    pub containing: Vec<Poi>,
    /// Other nearby POIs (`contains_device == false`), in server order.
    pub nearby: Vec<Poi>,
}

impl NearbyPois {
    /// All POIs, containing ones first.
    pub fn all(&self) -> Vec<Poi> {
        self.containing
            .iter()
            .chain(self.nearby.iter())
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.containing.is_empty() && self.nearby.is_empty()
    }
}

/// Parse a response body.
///
/// Fails only when the body is empty, is not JSON, or lacks a `places`
/// object. Missing `userWithin` / `pois` arrays yield empty lists.
pub fn parse_response(body: &str) -> Result<NearbyPois, QueryError> {
    if body.trim().is_empty() {
        return Err(QueryError::ServerResponse(
            "Unable to get nearby places, server response is empty".to_string(),
        ));
    }

    let root: Value = serde_json::from_str(body).map_err(|e| {
        QueryError::ServerResponse(format!("Unable to decode nearby places response: {}", e))
    })?;

    let places = root
        .get(KEY_PLACES)
        .and_then(Value::as_object)
        .ok_or_else(|| {
            QueryError::ServerResponse(format!(
                "Nearby places response has no '{}' object",
                KEY_PLACES
            ))
        })?;

    let containing = parse_list(places.get(KEY_USER_WITHIN), true);
    let nearby = parse_list(places.get(KEY_POIS), false);

    tracing::debug!(
        containing = containing.len(),
        nearby = nearby.len(),
        "Parsed nearby places response"
    );

    Ok(NearbyPois { containing, nearby })
}

fn parse_list(list: Option<&Value>, contains_device: bool) -> Vec<Poi> {
    let Some(entries) = list.and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(parse_entry)
        .map(|poi| poi.with_contains_device(contains_device))
        .collect()
}

/// Parse one `{ "p": [...], "x": {...} }` entry. Returns `None` when the
/// entry must be skipped.
pub fn parse_entry(entry: &Value) -> Option<Poi> {
    let Some(details) = entry.get(KEY_DETAILS).and_then(Value::as_array) else {
        tracing::debug!("Ignoring POI entry without a detail array");
        return None;
    };

    if details.len() != POI_DETAIL_LENGTH {
        tracing::debug!(
            length = details.len(),
            "Ignoring POI entry, detail array does not have the expected format"
        );
        return None;
    }

    let identifier = match scalar_text(&details[INDEX_IDENTIFIER]) {
        Some(id) if !id.is_empty() => id,
        _ => {
            tracing::debug!("Ignoring POI entry, invalid identifier");
            return None;
        }
    };

    let name = scalar_text(&details[INDEX_NAME]).unwrap_or_else(|| UNNAMED.to_string());

    let (Some(latitude), Some(longitude)) = (
        parse_f64(&details[INDEX_LATITUDE]),
        parse_f64(&details[INDEX_LONGITUDE]),
    ) else {
        tracing::warn!(
            identifier = %identifier,
            "Ignoring POI, unable to read latitude/longitude"
        );
        return None;
    };

    let poi = match Poi::new(identifier, name, latitude, longitude) {
        Ok(poi) => poi,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring POI, invalid latitude/longitude");
            return None;
        }
    };

    let radius = parse_i64(&details[INDEX_RADIUS])
        .and_then(|r| u32::try_from(r).ok())
        .unwrap_or(DEFAULT_POI_RADIUS);
    let library = scalar_text(&details[INDEX_LIBRARY]).unwrap_or_default();
    let weight = parse_i64(&details[INDEX_WEIGHT])
        .and_then(|w| i32::try_from(w).ok())
        .unwrap_or(DEFAULT_POI_WEIGHT);

    let mut poi = poi
        .with_radius(radius)
        .with_library(library)
        .with_weight(weight);

    if let Some(metadata) = entry.get(KEY_METADATA).and_then(Value::as_object) {
        poi = poi.with_metadata(flatten_metadata(metadata));
    }

    Some(poi)
}

/// Text of a scalar value; `None` for null, objects and arrays.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn parse_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Integer reading that accepts numbers and numeric strings, truncating
/// fractional values.
fn parse_i64(value: &Value) -> Option<i64> {
    let truncate = |f: f64| f.is_finite().then(|| f.trunc() as i64);
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    }
}
