//! Points of Interest.
//!
//! A [`Poi`] is the unit the rest of the crate trades in: the parser
//! produces them, the membership engine caches and ranks them, and the
//! store persists them in their JSON form.

mod metadata;
mod model;

pub use metadata::{flatten_metadata, Metadata};
pub use model::{Poi, PoiError, DEFAULT_POI_RADIUS, DEFAULT_POI_WEIGHT};
