//! Nearby-places queries against the edge service.
//!
//! The flow is URL building ([`build_query_url`]), one GET through an
//! injected [`HttpClient`], then [`parse_response`] into [`NearbyPois`].
//! Every batch-level failure is a [`QueryError`] whose
//! [`status`](QueryError::status) gives the host-facing [`RequestStatus`].
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use poitrack::config::PlacesConfig;
//! use poitrack::query::{NearbyQuery, QueryService, ReqwestClient};
//!
//! let config = PlacesConfig::new("places.example.com", ["738"])?;
//! let service = QueryService::new(Arc::new(ReqwestClient::new()?));
//! let pois = service.get_nearby_places(&NearbyQuery::new(37.33, -121.90), &config)?;
//! ```

mod error;
mod http;
mod parser;
mod service;

pub use error::{QueryError, RequestStatus};
pub use http::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestClient, DEFAULT_NETWORK_TIMEOUT,
};
pub use parser::{parse_entry, parse_response, NearbyPois, POI_DETAIL_LENGTH};
pub use service::{
    build_query_url, NearbyPlacesResult, NearbyQuery, QueryService, DEFAULT_NEARBY_COUNT,
    QUERY_PATH,
};
