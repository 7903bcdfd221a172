//! Slot layout and (de)serialization of membership state.
//!
//! Each piece of state lives in its own slot so a damaged slot only loses
//! that piece. POIs are stored as JSON strings in their persisted form; the
//! cache is a JSON object keyed by identifier, in cache order.

use indexmap::IndexMap;
use serde_json::Value;

use super::auth::AuthorizationStatus;
use crate::poi::Poi;
use crate::store::DataStore;

pub const KEY_NEARBY_POIS: &str = "nearbypois";
pub const KEY_CURRENT_POI: &str = "currentpoi";
pub const KEY_LAST_ENTERED_POI: &str = "lastenteredpoi";
pub const KEY_LAST_EXITED_POI: &str = "lastexitedpoi";
pub const KEY_AUTH_STATUS: &str = "authstatus";
pub const KEY_MEMBERSHIP_VALID_UNTIL: &str = "places_membership_valid_until";
pub const KEY_LAST_KNOWN_LATITUDE: &str = "lastknownlatitude";
pub const KEY_LAST_KNOWN_LONGITUDE: &str = "lastknownlongitude";

/// Membership slots cleared when membership data expires.
pub(crate) const MEMBERSHIP_KEYS: [&str; 4] = [
    KEY_CURRENT_POI,
    KEY_LAST_ENTERED_POI,
    KEY_LAST_EXITED_POI,
    KEY_MEMBERSHIP_VALID_UNTIL,
];

/// Everything read back from a store at startup.
#[derive(Debug, Default)]
pub(crate) struct LoadedState {
    pub cached_pois: IndexMap<String, Poi>,
    pub current_poi: Option<Poi>,
    pub last_entered_poi: Option<Poi>,
    pub last_exited_poi: Option<Poi>,
    pub auth_status: AuthorizationStatus,
    pub membership_valid_until: i64,
}

pub(crate) fn load(store: &dyn DataStore) -> LoadedState {
    let cached_pois = read_cache(store);
    let current_poi = read_poi(store, KEY_CURRENT_POI);
    let last_entered_poi = read_poi(store, KEY_LAST_ENTERED_POI);
    let last_exited_poi = read_poi(store, KEY_LAST_EXITED_POI);

    let auth_status = AuthorizationStatus::from_optional(store.get_string(KEY_AUTH_STATUS).as_deref());
    let membership_valid_until = store.get_long(KEY_MEMBERSHIP_VALID_UNTIL).unwrap_or(0);

    tracing::debug!(
        cached = cached_pois.len(),
        current = current_poi.as_ref().map(Poi::identifier),
        auth_status = %auth_status,
        valid_until = membership_valid_until,
        "Loaded membership state from store"
    );

    LoadedState {
        cached_pois,
        current_poi,
        last_entered_poi,
        last_exited_poi,
        auth_status,
        membership_valid_until,
    }
}

fn read_cache(store: &dyn DataStore) -> IndexMap<String, Poi> {
    let Some(json) = store.get_string(KEY_NEARBY_POIS).filter(|s| !s.is_empty()) else {
        return IndexMap::new();
    };

    let entries = match serde_json::from_str::<IndexMap<String, Value>>(&json) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = %e, "Unable to load cached POIs from store, ignoring");
            return IndexMap::new();
        }
    };

    entries
        .into_iter()
        .filter_map(|(key, value)| match serde_json::from_value::<Poi>(value) {
            Ok(poi) if poi.identifier() == key => Some((key, poi)),
            Ok(poi) => {
                tracing::warn!(
                    key = %key,
                    identifier = poi.identifier(),
                    "Cached POI stored under another identifier, skipping"
                );
                None
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Unable to load cached POI, skipping");
                None
            }
        })
        .collect()
}

fn read_poi(store: &dyn DataStore, key: &str) -> Option<Poi> {
    let json = store.get_string(key).filter(|s| !s.is_empty())?;
    match Poi::from_json_str(&json) {
        Ok(poi) => Some(poi),
        Err(e) => {
            tracing::warn!(key, error = %e, "Unable to load POI from store, ignoring");
            None
        }
    }
}

/// Write the cache slot, removing it when the cache is empty.
pub(crate) fn write_cache(store: &dyn DataStore, cache: &IndexMap<String, Poi>) {
    if cache.is_empty() {
        remove(store, KEY_NEARBY_POIS);
        return;
    }

    match serde_json::to_string(cache) {
        Ok(json) => {
            if let Err(e) = store.set_string(KEY_NEARBY_POIS, &json) {
                tracing::warn!(error = %e, "Unable to persist nearby POIs");
            } else {
                tracing::trace!(json = %json, "Nearby POIs persisted");
            }
        }
        Err(e) => tracing::warn!(error = %e, "Unable to encode nearby POIs"),
    }
}

/// Write a POI slot, removing it when there is no POI.
pub(crate) fn write_poi(store: &dyn DataStore, key: &str, poi: Option<&Poi>) {
    let Some(poi) = poi else {
        remove(store, key);
        return;
    };

    match poi.to_json_string() {
        Ok(json) => {
            if let Err(e) = store.set_string(key, &json) {
                tracing::warn!(key, error = %e, "Unable to persist POI");
            }
        }
        Err(e) => tracing::warn!(key, error = %e, "Unable to encode POI"),
    }
}

pub(crate) fn write_long(store: &dyn DataStore, key: &str, value: i64) {
    if let Err(e) = store.set_long(key, value) {
        tracing::warn!(key, error = %e, "Unable to persist value");
    }
}

pub(crate) fn write_double(store: &dyn DataStore, key: &str, value: f64) {
    if let Err(e) = store.set_double(key, value) {
        tracing::warn!(key, error = %e, "Unable to persist value");
    }
}

pub(crate) fn write_string(store: &dyn DataStore, key: &str, value: &str) {
    if let Err(e) = store.set_string(key, value) {
        tracing::warn!(key, error = %e, "Unable to persist value");
    }
}

pub(crate) fn remove(store: &dyn DataStore, key: &str) {
    if let Err(e) = store.remove(key) {
        tracing::warn!(key, error = %e, "Unable to remove value from store");
    }
}
