//! POI membership state.
//!
//! [`MembershipState`] is the single writer of everything the crate knows
//! about the device and its POIs: the nearby cache from the last query,
//! which POI is current, the last entered and exited POIs, authorization
//! status, and how long that membership data stays valid.
//!
//! ```text
//! query response ──► process_nearby ──┐
//!                                     ├──► cache + pointers ──► store
//! region event ───► process_region_event
//!                                     │
//!                     shared_snapshot ◄┘  (expires stale membership first)
//! ```

mod auth;
mod engine;
mod persist;
mod region;
mod snapshot;

pub use auth::AuthorizationStatus;
pub use engine::MembershipState;
pub use persist::{
    KEY_AUTH_STATUS, KEY_CURRENT_POI, KEY_LAST_ENTERED_POI, KEY_LAST_EXITED_POI,
    KEY_LAST_KNOWN_LATITUDE, KEY_LAST_KNOWN_LONGITUDE, KEY_MEMBERSHIP_VALID_UNTIL,
    KEY_NEARBY_POIS,
};
pub use region::{
    RegionTransition, TransitionKind, KEY_REGION_EVENT_TYPE, KEY_TIMESTAMP,
    KEY_TRIGGERING_REGION,
};
pub use snapshot::SharedSnapshot;
