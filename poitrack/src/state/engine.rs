//! The membership state engine.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use super::auth::AuthorizationStatus;
use super::persist::{self, MEMBERSHIP_KEYS};
use super::region::{RegionTransition, TransitionKind};
use super::snapshot::SharedSnapshot;
use crate::clock::{Clock, SystemClock};
use crate::config::{PlacesConfig, DEFAULT_MEMBERSHIP_TTL_SECS};
use crate::coord::GeoPoint;
use crate::poi::Poi;
use crate::query::NearbyPois;
use crate::store::DataStore;

/// Tracks which cached POIs contain the device.
///
/// The engine owns the nearby-POI cache, the current / last-entered /
/// last-exited pointers, the authorization status and the membership
/// validity timestamp. Every mutation of the cache or a pointer is followed
/// by a full write of all slots to the store.
///
/// All mutating operations take `&mut self`; the engine holds no locks and
/// the caller serializes access. Pointers are always independent clones,
/// never views into the cache.
///
/// Without a store the engine still works in memory; loads yield defaults
/// and writes are skipped with a warning.
pub struct MembershipState {
    cached_pois: IndexMap<String, Poi>,
    current_poi: Option<Poi>,
    last_entered_poi: Option<Poi>,
    last_exited_poi: Option<Poi>,
    auth_status: AuthorizationStatus,
    membership_valid_until: i64,
    membership_ttl: u64,
    store: Option<Arc<dyn DataStore>>,
    clock: Arc<dyn Clock>,
}

impl MembershipState {
    /// Create an engine on the system clock and load persisted state.
    pub fn new(store: Option<Arc<dyn DataStore>>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Create an engine on a specific clock and load persisted state.
    pub fn with_clock(store: Option<Arc<dyn DataStore>>, clock: Arc<dyn Clock>) -> Self {
        let loaded = match store.as_deref() {
            Some(store) => persist::load(store),
            None => {
                warn!("Unable to load POIs from persistence, no store available");
                Default::default()
            }
        };

        Self {
            cached_pois: loaded.cached_pois,
            current_poi: loaded.current_poi,
            last_entered_poi: loaded.last_entered_poi,
            last_exited_poi: loaded.last_exited_poi,
            auth_status: loaded.auth_status,
            membership_valid_until: loaded.membership_valid_until,
            membership_ttl: DEFAULT_MEMBERSHIP_TTL_SECS,
            store,
            clock,
        }
    }

    /// Apply settings from a places configuration.
    pub fn apply_config(&mut self, config: &PlacesConfig) {
        self.set_membership_ttl(config.membership_ttl());
    }

    /// Set the membership TTL in seconds. Applies from the next refresh.
    pub fn set_membership_ttl(&mut self, secs: u64) {
        self.membership_ttl = secs;
    }

    /// Merge a successful nearby-query response.
    ///
    /// The current POI is reset; if `inside` is non-empty its first element
    /// becomes both current and last-entered, in the order given (not by
    /// priority). The cache is replaced by `inside` followed by `nearby`;
    /// a later duplicate identifier overwrites the earlier entry in place.
    pub fn process_query_response(&mut self, inside: &[Poi], nearby: &[Poi]) {
        self.current_poi = None;

        if let Some(first) = inside.first() {
            self.current_poi = Some(first.clone());
            self.last_entered_poi = Some(first.clone());
        }

        self.cached_pois.clear();
        for poi in inside.iter().chain(nearby.iter()) {
            self.cached_pois
                .insert(poi.identifier().to_string(), poi.clone());
        }

        debug!(
            inside = inside.len(),
            nearby = nearby.len(),
            cached = self.cached_pois.len(),
            current = self.current_poi.as_ref().map(Poi::identifier),
            "Processed nearby query response"
        );

        self.refresh_validity();
        self.persist();
    }

    /// Merge parser output. See [`process_query_response`](Self::process_query_response).
    pub fn process_nearby(&mut self, pois: &NearbyPois) {
        self.process_query_response(&pois.containing, &pois.nearby);
    }

    /// Apply a region entry or exit for a cached POI.
    ///
    /// Returns `None`, leaving state untouched, when `region_id` is empty,
    /// `kind` is not `"entry"` or `"exit"`, or the POI is not cached.
    pub fn process_region_event(&mut self, region_id: &str, kind: &str) -> Option<RegionTransition> {
        if region_id.is_empty() {
            warn!("Invalid region id, ignoring region event");
            return None;
        }

        let Some(kind) = TransitionKind::parse(kind) else {
            warn!(kind, "Unknown region event type, ignoring region event");
            return None;
        };

        let Some(matched) = self.cached_pois.get_mut(region_id) else {
            warn!(
                region_id,
                "Unable to find POI details for region, ignoring region event"
            );
            return None;
        };

        let poi = match kind {
            TransitionKind::Entry => {
                matched.set_contains_device(true);
                let matched = matched.clone();

                self.last_entered_poi = Some(matched.clone());
                if matched.higher_priority_than(self.current_poi.as_ref()) {
                    self.current_poi = Some(matched.clone());
                }
                matched
            }
            TransitionKind::Exit => {
                if self.current_poi.as_ref() == Some(&*matched) {
                    self.current_poi = None;
                }

                matched.set_contains_device(false);
                let matched = matched.clone();

                self.current_poi = self.calculate_current_poi();
                self.last_exited_poi = Some(matched.clone());
                matched
            }
        };

        info!(
            region_id,
            kind = %kind,
            current = self.current_poi.as_ref().map(Poi::identifier),
            "Processed region event"
        );

        self.refresh_validity();
        self.persist();

        Some(RegionTransition {
            poi,
            kind,
            timestamp: self.clock.now_secs(),
        })
    }

    /// Snapshot of the shareable state.
    ///
    /// Expired membership data (current, last entered, last exited and the
    /// validity timestamp) is cleared first, both in memory and in the
    /// store. The cache and the authorization status are not affected.
    pub fn shared_snapshot(&mut self) -> SharedSnapshot {
        if !self.is_membership_valid() {
            self.clear_membership_data();
        }

        SharedSnapshot {
            nearby_pois: self.cached_pois.values().cloned().collect(),
            auth_status: self.auth_status,
            current_poi: self.current_poi.clone(),
            last_entered_poi: self.last_entered_poi.clone(),
            last_exited_poi: self.last_exited_poi.clone(),
            valid_until: self.membership_valid_until,
        }
    }

    /// Copies of cached POIs that contain the device, in cache order.
    pub fn pois_containing_device(&self) -> Vec<Poi> {
        self.cached_pois
            .values()
            .filter(|poi| poi.contains_device())
            .cloned()
            .collect()
    }

    /// Record the location authorization status.
    ///
    /// Absent or unrecognized values fall back to `unknown`.
    pub fn set_authorization_status(&mut self, status: Option<&str>) {
        self.auth_status = AuthorizationStatus::from_optional(status);

        let Some(store) = self.store.as_deref() else {
            warn!("Unable to persist authorization status, no store available");
            return;
        };

        persist::write_string(store, persist::KEY_AUTH_STATUS, self.auth_status.as_str());
        debug!(status = %self.auth_status, "Authorization status persisted");
    }

    /// Clear the cache, every pointer and the validity timestamp, persist
    /// the empty state, forget the last known location and reset the
    /// authorization status.
    pub fn reset(&mut self) {
        self.cached_pois.clear();
        self.current_poi = None;
        self.last_entered_poi = None;
        self.last_exited_poi = None;
        self.membership_valid_until = 0;
        self.persist();

        self.clear_last_known_location();
        self.set_authorization_status(None);

        info!("Membership state reset");
    }

    /// Persist the device location. Out-of-range coordinates clear it.
    pub fn save_last_known_location(&self, latitude: f64, longitude: f64) {
        let Some(store) = self.store.as_deref() else {
            warn!("Unable to persist last known location, no store available");
            return;
        };

        match GeoPoint::new(latitude, longitude) {
            Ok(point) => {
                persist::write_double(store, persist::KEY_LAST_KNOWN_LATITUDE, point.latitude());
                persist::write_double(store, persist::KEY_LAST_KNOWN_LONGITUDE, point.longitude());
            }
            Err(e) => {
                debug!(error = %e, "Clearing last known location");
                self.clear_last_known_location();
            }
        }
    }

    /// The persisted device location, if present and valid.
    pub fn last_known_location(&self) -> Option<GeoPoint> {
        let store = self.store.as_deref()?;
        let latitude = store.get_double(persist::KEY_LAST_KNOWN_LATITUDE)?;
        let longitude = store.get_double(persist::KEY_LAST_KNOWN_LONGITUDE)?;
        GeoPoint::new(latitude, longitude).ok()
    }

    pub fn cached_pois(&self) -> &IndexMap<String, Poi> {
        &self.cached_pois
    }

    pub fn current_poi(&self) -> Option<&Poi> {
        self.current_poi.as_ref()
    }

    pub fn last_entered_poi(&self) -> Option<&Poi> {
        self.last_entered_poi.as_ref()
    }

    pub fn last_exited_poi(&self) -> Option<&Poi> {
        self.last_exited_poi.as_ref()
    }

    pub fn authorization_status(&self) -> AuthorizationStatus {
        self.auth_status
    }

    /// Unix seconds until which membership data is valid.
    pub fn membership_valid_until(&self) -> i64 {
        self.membership_valid_until
    }

    pub fn membership_ttl(&self) -> u64 {
        self.membership_ttl
    }

    /// Highest-priority cached POI containing the device.
    ///
    /// On an exact priority tie the comparison favors the candidate, so the
    /// last such entry in cache order wins.
    fn calculate_current_poi(&self) -> Option<Poi> {
        let mut best: Option<&Poi> = None;
        for poi in self.cached_pois.values().filter(|p| p.contains_device()) {
            if poi.higher_priority_than(best) {
                best = Some(poi);
            }
        }
        best.cloned()
    }

    fn is_membership_valid(&self) -> bool {
        self.clock.now_secs() < self.membership_valid_until
    }

    fn refresh_validity(&mut self) {
        let ttl = i64::try_from(self.membership_ttl).unwrap_or(i64::MAX);
        self.membership_valid_until = self.clock.now_secs().saturating_add(ttl);
    }

    fn clear_membership_data(&mut self) {
        self.current_poi = None;
        self.last_entered_poi = None;
        self.last_exited_poi = None;
        self.membership_valid_until = 0;

        let Some(store) = self.store.as_deref() else {
            warn!("Unable to clear membership data, no store available");
            return;
        };

        for key in MEMBERSHIP_KEYS {
            persist::remove(store, key);
        }
        debug!("Expired membership data cleared");
    }

    fn clear_last_known_location(&self) {
        if let Some(store) = self.store.as_deref() {
            persist::remove(store, persist::KEY_LAST_KNOWN_LATITUDE);
            persist::remove(store, persist::KEY_LAST_KNOWN_LONGITUDE);
        }
    }

    fn persist(&self) {
        let Some(store) = self.store.as_deref() else {
            warn!("Unable to persist POIs, no store available");
            return;
        };

        persist::write_cache(store, &self.cached_pois);
        persist::write_poi(store, persist::KEY_CURRENT_POI, self.current_poi.as_ref());
        persist::write_poi(
            store,
            persist::KEY_LAST_ENTERED_POI,
            self.last_entered_poi.as_ref(),
        );
        persist::write_poi(
            store,
            persist::KEY_LAST_EXITED_POI,
            self.last_exited_poi.as_ref(),
        );
        persist::write_long(
            store,
            persist::KEY_MEMBERSHIP_VALID_UNTIL,
            self.membership_valid_until,
        );
    }
}

impl std::fmt::Debug for MembershipState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MembershipState")
            .field("cached_pois", &self.cached_pois.len())
            .field("current_poi", &self.current_poi.as_ref().map(Poi::identifier))
            .field("auth_status", &self.auth_status)
            .field("membership_valid_until", &self.membership_valid_until)
            .field("membership_ttl", &self.membership_ttl)
            .field("has_store", &self.store.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::store::MemoryStore;

    const NOW: i64 = 1_700_000_000;

    struct Fixture {
        store: Arc<MemoryStore>,
        clock: Arc<ManualClock>,
        state: MembershipState,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(NOW));
        let state = MembershipState::with_clock(Some(store.clone()), clock.clone());
        Fixture {
            store,
            clock,
            state,
        }
    }

    fn poi(id: &str, weight: i32, radius: u32) -> Poi {
        Poi::new(id, format!("POI {}", id), 37.3, -121.9)
            .unwrap()
            .with_weight(weight)
            .with_radius(radius)
    }

    fn inside(id: &str, weight: i32, radius: u32) -> Poi {
        poi(id, weight, radius).with_contains_device(true)
    }

    #[test]
    fn test_query_response_sets_current_and_cache() {
        let mut f = fixture();
        f.state.process_query_response(
            &[inside("X", 10, 100)],
            &[poi("Y", 1, 100), poi("Z", 2, 100)],
        );

        assert_eq!(f.state.current_poi().unwrap().identifier(), "X");
        assert_eq!(f.state.last_entered_poi().unwrap().identifier(), "X");
        assert_eq!(f.state.cached_pois().len(), 3);
        assert_eq!(
            f.state.membership_valid_until(),
            NOW + DEFAULT_MEMBERSHIP_TTL_SECS as i64
        );
    }

    #[test]
    fn test_query_response_uses_first_inside_not_priority() {
        let mut f = fixture();
        f.state
            .process_query_response(&[inside("low", 9, 100), inside("high", 1, 100)], &[]);
        assert_eq!(f.state.current_poi().unwrap().identifier(), "low");
    }

    #[test]
    fn test_query_response_without_inside_clears_current_only() {
        let mut f = fixture();
        f.state.process_query_response(&[inside("X", 1, 100)], &[]);
        f.state.process_query_response(&[], &[poi("Y", 1, 100)]);

        assert!(f.state.current_poi().is_none());
        assert_eq!(f.state.last_entered_poi().unwrap().identifier(), "X");
        assert_eq!(f.state.cached_pois().len(), 1);
    }

    #[test]
    fn test_duplicate_nearby_overwrites_inside() {
        let mut f = fixture();
        f.state.process_query_response(
            &[inside("dup", 1, 100), inside("other", 1, 100)],
            &[poi("dup", 7, 100)],
        );

        let keys: Vec<_> = f.state.cached_pois().keys().cloned().collect();
        assert_eq!(keys, vec!["dup", "other"]);
        let cached = &f.state.cached_pois()["dup"];
        assert_eq!(cached.weight(), 7);
        assert!(!cached.contains_device());
    }

    #[test]
    fn test_entry_lower_weight_takes_current() {
        let mut f = fixture();
        f.state
            .process_query_response(&[inside("B", 2, 100)], &[poi("A", 1, 100)]);
        assert_eq!(f.state.current_poi().unwrap().identifier(), "B");

        let transition = f.state.process_region_event("A", "entry").unwrap();
        assert_eq!(transition.kind, TransitionKind::Entry);
        assert_eq!(transition.poi.identifier(), "A");
        assert!(transition.poi.contains_device());
        assert_eq!(transition.timestamp, NOW);
        assert_eq!(f.state.current_poi().unwrap().identifier(), "A");
        assert_eq!(f.state.last_entered_poi().unwrap().identifier(), "A");
        assert!(f.state.cached_pois()["A"].contains_device());
    }

    #[test]
    fn test_entry_higher_weight_keeps_current() {
        let mut f = fixture();
        f.state
            .process_query_response(&[inside("A", 1, 100)], &[poi("B", 2, 100)]);

        f.state.process_region_event("B", "entry").unwrap();
        assert_eq!(f.state.current_poi().unwrap().identifier(), "A");
        assert_eq!(f.state.last_entered_poi().unwrap().identifier(), "B");
    }

    #[test]
    fn test_exit_of_only_current_clears_it() {
        let mut f = fixture();
        f.state.process_query_response(&[inside("A", 1, 100)], &[]);

        let transition = f.state.process_region_event("A", "exit").unwrap();
        assert_eq!(transition.kind, TransitionKind::Exit);
        assert!(f.state.current_poi().is_none());

        let exited = f.state.last_exited_poi().unwrap();
        assert_eq!(exited.identifier(), "A");
        assert!(!exited.contains_device());
        assert!(!f.state.cached_pois()["A"].contains_device());
    }

    #[test]
    fn test_exit_recomputes_best_remaining() {
        let mut f = fixture();
        f.state.process_query_response(
            &[inside("A", 1, 100), inside("B", 3, 100), inside("C", 2, 100)],
            &[],
        );

        f.state.process_region_event("A", "exit").unwrap();
        assert_eq!(f.state.current_poi().unwrap().identifier(), "C");
    }

    #[test]
    fn test_exit_tie_break_last_equal_entry_wins() {
        let mut f = fixture();
        f.state.process_query_response(
            &[
                inside("gone", 1, 100),
                inside("first", 5, 50),
                inside("second", 5, 50),
            ],
            &[],
        );

        f.state.process_region_event("gone", "exit").unwrap();
        assert_eq!(f.state.current_poi().unwrap().identifier(), "second");
    }

    #[test]
    fn test_pointers_are_independent_copies() {
        let mut f = fixture();
        f.state.process_query_response(&[], &[poi("A", 1, 100)]);
        f.state.process_region_event("A", "entry").unwrap();
        f.state.process_region_event("A", "exit").unwrap();

        // The exit flipped the cached entry; last-entered kept its own value.
        assert!(f.state.last_entered_poi().unwrap().contains_device());
        assert!(!f.state.cached_pois()["A"].contains_device());
    }

    #[test]
    fn test_region_event_rejections_leave_state() {
        let mut f = fixture();
        f.state.process_query_response(&[inside("A", 1, 100)], &[]);
        let before = f.state.membership_valid_until();
        f.clock.advance(10);

        assert!(f.state.process_region_event("", "entry").is_none());
        assert!(f.state.process_region_event("A", "dwell").is_none());
        assert!(f.state.process_region_event("missing", "exit").is_none());

        assert_eq!(f.state.membership_valid_until(), before);
        assert_eq!(f.state.current_poi().unwrap().identifier(), "A");
    }

    #[test]
    fn test_region_event_refreshes_validity() {
        let mut f = fixture();
        f.state.set_membership_ttl(60);
        f.state.process_query_response(&[], &[poi("A", 1, 100)]);
        f.clock.advance(30);

        f.state.process_region_event("A", "entry").unwrap();
        assert_eq!(f.state.membership_valid_until(), NOW + 90);
    }

    #[test]
    fn test_snapshot_is_idempotent_while_valid() {
        let mut f = fixture();
        f.state
            .process_query_response(&[inside("A", 1, 100)], &[poi("B", 2, 100)]);

        let first = f.state.shared_snapshot();
        let second = f.state.shared_snapshot();
        assert_eq!(first, second);
        assert_eq!(first.to_event_data(), second.to_event_data());
        assert_eq!(first.current_poi.unwrap().identifier(), "A");
    }

    #[test]
    fn test_snapshot_expiry_clears_membership() {
        let mut f = fixture();
        f.state.set_membership_ttl(60);
        f.state
            .process_query_response(&[inside("A", 1, 100)], &[poi("B", 2, 100)]);
        f.state.process_region_event("A", "exit").unwrap();
        f.clock.advance(60);

        let snapshot = f.state.shared_snapshot();
        assert!(snapshot.current_poi.is_none());
        assert!(snapshot.last_entered_poi.is_none());
        assert!(snapshot.last_exited_poi.is_none());
        assert_eq!(snapshot.valid_until, 0);
        assert_eq!(snapshot.nearby_pois.len(), 2);

        let data = snapshot.to_event_data();
        assert!(!data.contains_key("currentpoi"));
        assert!(!data.contains_key("lastenteredpoi"));
        assert!(!data.contains_key("lastexitedpoi"));
        assert!(data.contains_key("nearbypois"));

        for key in MEMBERSHIP_KEYS {
            assert!(!f.store.contains(key), "{} should be removed", key);
        }
        assert!(f.store.contains(persist::KEY_NEARBY_POIS));
    }

    #[test]
    fn test_pois_containing_device() {
        let mut f = fixture();
        f.state.process_query_response(
            &[inside("A", 1, 100), inside("C", 1, 100)],
            &[poi("B", 1, 100)],
        );

        let ids: Vec<_> = f
            .state
            .pois_containing_device()
            .iter()
            .map(|p| p.identifier().to_string())
            .collect();
        assert_eq!(ids, vec!["A", "C"]);

        f.state.process_region_event("A", "exit").unwrap();
        f.state.process_region_event("C", "exit").unwrap();
        assert!(f.state.pois_containing_device().is_empty());
    }

    #[test]
    fn test_authorization_status() {
        let mut f = fixture();
        f.state.set_authorization_status(Some("always"));
        assert_eq!(f.state.authorization_status(), AuthorizationStatus::Always);
        assert_eq!(
            f.store.get_string(persist::KEY_AUTH_STATUS).as_deref(),
            Some("always")
        );

        f.state.set_authorization_status(Some("bogus"));
        assert_eq!(f.state.authorization_status(), AuthorizationStatus::Unknown);

        f.state.set_authorization_status(None);
        assert_eq!(
            f.store.get_string(persist::KEY_AUTH_STATUS).as_deref(),
            Some("unknown")
        );
    }

    #[test]
    fn test_reset() {
        let mut f = fixture();
        f.state
            .process_query_response(&[inside("A", 1, 100)], &[poi("B", 1, 100)]);
        f.state.set_authorization_status(Some("wheninuse"));
        f.state.save_last_known_location(10.0, 20.0);

        f.state.reset();

        assert!(f.state.cached_pois().is_empty());
        assert!(f.state.current_poi().is_none());
        assert!(f.state.last_entered_poi().is_none());
        assert!(f.state.last_exited_poi().is_none());
        assert_eq!(f.state.membership_valid_until(), 0);
        assert_eq!(f.state.authorization_status(), AuthorizationStatus::Unknown);
        assert!(f.state.last_known_location().is_none());
        assert!(!f.store.contains(persist::KEY_NEARBY_POIS));
        assert!(!f.store.contains(persist::KEY_CURRENT_POI));
        assert_eq!(f.store.get_long(persist::KEY_MEMBERSHIP_VALID_UNTIL), Some(0));
    }

    #[test]
    fn test_last_known_location() {
        let f = fixture();
        assert!(f.state.last_known_location().is_none());

        f.state.save_last_known_location(37.5, -122.25);
        let location = f.state.last_known_location().unwrap();
        assert_eq!(location.latitude(), 37.5);
        assert_eq!(location.longitude(), -122.25);

        f.state.save_last_known_location(95.0, 0.0);
        assert!(f.state.last_known_location().is_none());
        assert!(!f.store.contains(persist::KEY_LAST_KNOWN_LATITUDE));
        assert!(!f.store.contains(persist::KEY_LAST_KNOWN_LONGITUDE));
    }

    #[test]
    fn test_state_survives_new_instance() {
        let mut f = fixture();
        f.state
            .process_query_response(&[inside("A", 1, 100)], &[poi("B", 2, 100)]);
        f.state.process_region_event("B", "entry").unwrap();
        f.state.set_authorization_status(Some("always"));

        let reloaded = MembershipState::with_clock(Some(f.store.clone()), f.clock.clone());
        assert_eq!(reloaded.cached_pois(), f.state.cached_pois());
        assert_eq!(reloaded.current_poi(), f.state.current_poi());
        assert_eq!(reloaded.last_entered_poi(), f.state.last_entered_poi());
        assert_eq!(reloaded.authorization_status(), AuthorizationStatus::Always);
        assert_eq!(
            reloaded.membership_valid_until(),
            f.state.membership_valid_until()
        );
    }

    #[test]
    fn test_invalid_stored_poi_never_matches_region_events() {
        let f = fixture();
        f.store
            .set_string(
                persist::KEY_NEARBY_POIS,
                r#"{"a":{"regionid":"","regionname":"A","latitude":500.0,"longitude":-999.0,"radius":10,"weight":1}}"#,
            )
            .unwrap();

        let mut state = MembershipState::with_clock(Some(f.store.clone()), f.clock.clone());
        assert!(state.cached_pois().is_empty());
        assert!(state.process_region_event("a", "entry").is_none());
        assert!(state.current_poi().is_none());
    }

    #[test]
    fn test_works_without_store() {
        let clock = Arc::new(ManualClock::new(NOW));
        let mut state = MembershipState::with_clock(None, clock);

        state.process_query_response(&[inside("A", 1, 100)], &[]);
        assert_eq!(state.current_poi().unwrap().identifier(), "A");
        state.set_authorization_status(Some("denied"));
        assert_eq!(state.authorization_status(), AuthorizationStatus::Denied);
        state.save_last_known_location(1.0, 2.0);
        assert!(state.last_known_location().is_none());
        state.reset();
        assert!(state.cached_pois().is_empty());
    }

    #[test]
    fn test_apply_config_sets_ttl() {
        let mut f = fixture();
        let config = PlacesConfig::new("host", ["lib"])
            .unwrap()
            .with_membership_ttl(120);
        f.state.apply_config(&config);
        assert_eq!(f.state.membership_ttl(), 120);
    }
}
