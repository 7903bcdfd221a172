//! The POI entity.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::metadata::{deserialize_metadata, Metadata};
use crate::coord::{is_valid_latitude, is_valid_longitude, CoordError};

/// Radius used when a POI does not carry a usable one (meters).
pub const DEFAULT_POI_RADIUS: u32 = 100;

/// Weight used when a POI does not carry a usable one.
pub const DEFAULT_POI_WEIGHT: i32 = 1000;

/// Errors raised when constructing a POI.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PoiError {
    #[error("POI identifier must not be empty")]
    EmptyIdentifier,

    #[error("POI coordinates rejected: {0}")]
    Coord(#[from] CoordError),
}

/// A Point of Interest: a named circle the device can be inside or outside of.
///
/// The serde representation is the persisted / shared form, keyed
/// `regionid`, `regionname`, `latitude`, `longitude`, `radius`,
/// `regionmetadata`, `useriswithin`, `libraryid` and `weight`.
///
/// Equality compares every field including metadata and the
/// `contains_device` flag; see [`Poi::eq_ignoring_metadata`] for the
/// looser form.
///
/// Reading the persisted form applies the same checks as [`Poi::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PoiRecord")]
pub struct Poi {
    #[serde(rename = "regionid")]
    identifier: String,
    #[serde(rename = "regionname")]
    name: String,
    latitude: f64,
    longitude: f64,
    radius: u32,
    #[serde(rename = "libraryid")]
    library: String,
    weight: i32,
    #[serde(rename = "regionmetadata")]
    metadata: Metadata,
    #[serde(rename = "useriswithin")]
    contains_device: bool,
}

/// Unchecked persisted form, validated on conversion into [`Poi`].
#[derive(Deserialize)]
struct PoiRecord {
    #[serde(rename = "regionid")]
    identifier: String,
    #[serde(rename = "regionname")]
    name: String,
    latitude: f64,
    longitude: f64,
    radius: u32,
    #[serde(rename = "libraryid", default)]
    library: String,
    weight: i32,
    #[serde(
        rename = "regionmetadata",
        default,
        deserialize_with = "deserialize_metadata"
    )]
    metadata: Metadata,
    #[serde(rename = "useriswithin", default)]
    contains_device: bool,
}

impl TryFrom<PoiRecord> for Poi {
    type Error = PoiError;

    fn try_from(record: PoiRecord) -> Result<Self, Self::Error> {
        Ok(Poi::new(record.identifier, record.name, record.latitude, record.longitude)?
            .with_radius(record.radius)
            .with_library(record.library)
            .with_weight(record.weight)
            .with_metadata(record.metadata)
            .with_contains_device(record.contains_device))
    }
}

impl Poi {
    /// Create a POI with default radius, weight and an empty library.
    ///
    /// Fails if `identifier` is empty or either coordinate is out of range.
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, PoiError> {
        let identifier = identifier.into();
        if identifier.is_empty() {
            return Err(PoiError::EmptyIdentifier);
        }
        if !is_valid_latitude(latitude) {
            return Err(CoordError::InvalidLatitude(latitude).into());
        }
        if !is_valid_longitude(longitude) {
            return Err(CoordError::InvalidLongitude(longitude).into());
        }

        Ok(Self {
            identifier,
            name: name.into(),
            latitude,
            longitude,
            radius: DEFAULT_POI_RADIUS,
            library: String::new(),
            weight: DEFAULT_POI_WEIGHT,
            metadata: Metadata::new(),
            contains_device: false,
        })
    }

    /// Set the radius in meters.
    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }

    /// Set the owning library.
    pub fn with_library(mut self, library: impl Into<String>) -> Self {
        self.library = library.into();
        self
    }

    /// Set the priority weight (lower wins).
    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }

    /// Attach metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Set the initial "device is within" flag.
    pub fn with_contains_device(mut self, contains_device: bool) -> Self {
        self.contains_device = contains_device;
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn library(&self) -> &str {
        &self.library
    }

    pub fn weight(&self) -> i32 {
        self.weight
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Whether the device is currently inside this POI.
    pub fn contains_device(&self) -> bool {
        self.contains_device
    }

    pub fn set_contains_device(&mut self, contains_device: bool) {
        self.contains_device = contains_device;
    }

    /// Equality over every field except metadata.
    pub fn eq_ignoring_metadata(&self, other: &Poi) -> bool {
        self.identifier == other.identifier
            && self.name == other.name
            && self.latitude == other.latitude
            && self.longitude == other.longitude
            && self.radius == other.radius
            && self.weight == other.weight
            && self.library == other.library
            && self.contains_device == other.contains_device
    }

    /// Returns true if this POI should take precedence over `other`.
    ///
    /// Lower weight wins; on equal weight the smaller (or equal) radius wins.
    /// When weight and radius are both equal this returns true in both
    /// directions, so whichever side is asked last takes the slot.
    pub fn higher_priority_than(&self, other: Option<&Poi>) -> bool {
        match other {
            None => true,
            Some(other) if other.weight < self.weight => false,
            Some(other) if other.weight == self.weight => other.radius >= self.radius,
            Some(_) => true,
        }
    }

    /// Render the persisted JSON form.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Read the persisted JSON form.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl std::fmt::Display for Poi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} \"{}\" ({:.6}, {:.6}) r={}m w={}",
            self.identifier, self.name, self.latitude, self.longitude, self.radius, self.weight
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn poi(id: &str, weight: i32, radius: u32) -> Poi {
        Poi::new(id, id, 37.3, -121.9)
            .unwrap()
            .with_weight(weight)
            .with_radius(radius)
    }

    #[test]
    fn test_new_applies_defaults() {
        let poi = Poi::new("id", "Name", 1.0, 2.0).unwrap();
        assert_eq!(poi.radius(), DEFAULT_POI_RADIUS);
        assert_eq!(poi.weight(), DEFAULT_POI_WEIGHT);
        assert_eq!(poi.library(), "");
        assert!(poi.metadata().is_empty());
        assert!(!poi.contains_device());
    }

    #[test]
    fn test_new_rejects_empty_identifier() {
        assert_eq!(
            Poi::new("", "Name", 1.0, 2.0).unwrap_err(),
            PoiError::EmptyIdentifier
        );
    }

    #[test]
    fn test_new_rejects_out_of_range_coordinates() {
        assert!(Poi::new("id", "Name", 91.0, 0.0).is_err());
        assert!(Poi::new("id", "Name", 0.0, 181.0).is_err());
    }

    #[test]
    fn test_lower_weight_wins() {
        let a = poi("a", 1, 50);
        let b = poi("b", 2, 10);
        assert!(a.higher_priority_than(Some(&b)));
        assert!(!b.higher_priority_than(Some(&a)));
    }

    #[test]
    fn test_equal_weight_smaller_radius_wins() {
        let small = poi("small", 5, 10);
        let large = poi("large", 5, 30);
        assert!(small.higher_priority_than(Some(&large)));
        assert!(!large.higher_priority_than(Some(&small)));
    }

    #[test]
    fn test_full_tie_is_true_both_ways() {
        let a = poi("a", 5, 30);
        let b = poi("b", 5, 30);
        assert!(a.higher_priority_than(Some(&b)));
        assert!(b.higher_priority_than(Some(&a)));
    }

    #[test]
    fn test_anything_beats_none() {
        assert!(poi("a", i32::MAX, u32::MAX).higher_priority_than(None));
    }

    #[test]
    fn test_equality_covers_flag_and_metadata() {
        let a = poi("a", 1, 1);
        let mut b = a.clone();
        assert_eq!(a, b);

        b.set_contains_device(true);
        assert_ne!(a, b);
        assert!(!a.eq_ignoring_metadata(&b));

        let mut metadata = Metadata::new();
        metadata.insert("k".into(), "v".into());
        let c = a.clone().with_metadata(metadata);
        assert_ne!(a, c);
        assert!(a.eq_ignoring_metadata(&c));
    }

    #[test]
    fn test_persisted_keys() {
        let poi = poi("abc", 7, 42).with_library("lib1");
        let value = serde_json::to_value(&poi).unwrap();

        assert_eq!(value["regionid"], "abc");
        assert_eq!(value["regionname"], "abc");
        assert_eq!(value["radius"], 42);
        assert_eq!(value["weight"], 7);
        assert_eq!(value["libraryid"], "lib1");
        assert_eq!(value["useriswithin"], false);
        assert!(value["regionmetadata"].is_object());
    }

    #[test]
    fn test_persisted_form_drops_nested_metadata() {
        let json = json!({
            "regionid": "abc",
            "regionname": "Cafe",
            "latitude": 10.0,
            "longitude": 20.0,
            "radius": 50,
            "libraryid": "lib",
            "weight": 3,
            "useriswithin": true,
            "regionmetadata": { "kind": "food", "tags": ["a"], "geo": { "x": 1 } }
        });

        let poi: Poi = serde_json::from_value(json).unwrap();
        assert!(poi.contains_device());
        assert_eq!(poi.metadata().len(), 1);
        assert_eq!(poi.metadata()["kind"], "food");
    }

    #[test]
    fn test_persisted_form_tolerates_missing_optional_fields() {
        let json = r#"{"regionid":"x","regionname":"X","latitude":1.0,"longitude":2.0,"radius":5,"weight":9}"#;
        let poi = Poi::from_json_str(json).unwrap();
        assert_eq!(poi.library(), "");
        assert!(poi.metadata().is_empty());
        assert!(!poi.contains_device());
    }

    #[test]
    fn test_persisted_form_is_validated() {
        let empty_id = r#"{"regionid":"","regionname":"X","latitude":1.0,"longitude":2.0,"radius":5,"weight":9}"#;
        assert!(Poi::from_json_str(empty_id).is_err());

        let bad_lat = r#"{"regionid":"x","regionname":"X","latitude":500.0,"longitude":2.0,"radius":5,"weight":9}"#;
        assert!(Poi::from_json_str(bad_lat).is_err());

        let bad_lon = json!({
            "regionid": "x", "regionname": "X", "latitude": 1.0, "longitude": -999.0,
            "radius": 5, "weight": 9
        });
        assert!(serde_json::from_value::<Poi>(bad_lon).is_err());
    }

    #[test]
    fn test_malformed_persisted_form_is_an_error() {
        assert!(Poi::from_json_str("{\"regionid\": 3}").is_err());
        assert!(Poi::from_json_str("not json").is_err());
    }

    mod property_tests {
        use super::*;
        use proptest::collection::btree_map;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_persisted_roundtrip(
                id in "[a-z0-9]{1,12}",
                name in ".{0,20}",
                lat in -90.0..=90.0_f64,
                lon in -180.0..=180.0_f64,
                radius in 0u32..100_000,
                weight in any::<i32>(),
                library in "[a-z0-9]{0,8}",
                within in any::<bool>(),
                metadata in btree_map("[a-z]{1,6}", ".{0,10}", 0..5)
            ) {
                let poi = Poi::new(id, name, lat, lon)
                    .unwrap()
                    .with_radius(radius)
                    .with_weight(weight)
                    .with_library(library)
                    .with_metadata(metadata)
                    .with_contains_device(within);

                let json = poi.to_json_string().unwrap();
                let restored = Poi::from_json_str(&json).unwrap();
                prop_assert_eq!(restored, poi);
            }
        }
    }
}
