//! Poitrack - POI membership tracking
//!
//! This library tracks a device's relationship to nearby Points of
//! Interest: which POIs contain it, which one is current, and which were
//! last entered and exited. Nearby POIs come from a remote edge query;
//! region entry/exit events update membership against that cache.
//!
//! # Modules
//!
//! - [`poi`]: the POI entity and its persisted form
//! - [`query`]: nearby-query service, HTTP transport and response parser
//! - [`state`]: the membership state engine
//! - [`store`]: key/value persistence
//! - [`config`]: places configuration and the INI config file
//! - [`coord`], [`clock`], [`logging`]: supporting pieces

pub mod clock;
pub mod config;
pub mod coord;
pub mod logging;
pub mod poi;
pub mod query;
pub mod state;
pub mod store;

pub use poi::Poi;
pub use query::{NearbyPois, QueryError, RequestStatus};
pub use state::MembershipState;
