//! Nearby-places query service.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use super::error::{QueryError, RequestStatus};
use super::http::{HttpClient, HttpRequest, DEFAULT_NETWORK_TIMEOUT};
use super::parser::{parse_response, NearbyPois};
use crate::config::PlacesConfig;
use crate::coord::GeoPoint;
use crate::poi::Poi;

/// Default number of POIs requested.
pub const DEFAULT_NEARBY_COUNT: usize = 20;

/// Path of the nearby query on the configured endpoint.
pub const QUERY_PATH: &str = "placesedgequery";

/// Parameters of one nearby query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub count: usize,
}

impl NearbyQuery {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            count: DEFAULT_NEARBY_COUNT,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }
}

/// Build the query URL:
/// `https://<endpoint>/placesedgequery?latitude=..&longitude=..&limit=..&library=..`
/// with one `library` parameter per configured library, in order.
///
/// Out-of-range coordinates are rejected before any URL is built.
pub fn build_query_url(query: &NearbyQuery, config: &PlacesConfig) -> Result<Url, QueryError> {
    GeoPoint::new(query.latitude, query.longitude)
        .map_err(|e| QueryError::InvalidLatLong(format!("Unable to form nearby query: {}", e)))?;

    let base = format!("https://{}/{}", config.endpoint(), QUERY_PATH);
    let mut url = Url::parse(&base).map_err(|e| {
        QueryError::InvalidLatLong(format!("Unable to form nearby query URL ({}): {}", base, e))
    })?;

    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("latitude", &query.latitude.to_string())
            .append_pair("longitude", &query.longitude.to_string())
            .append_pair("limit", &query.count.to_string());
        for library in config.libraries() {
            pairs.append_pair("library", library);
        }
    }

    Ok(url)
}

/// Queries the edge service for POIs around a location.
///
/// The HTTP client is optional; without one every query fails with
/// [`QueryError::Connectivity`].
#[derive(Clone)]
pub struct QueryService {
    client: Option<Arc<dyn HttpClient>>,
    timeout: Duration,
}

impl QueryService {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self {
            client: Some(client),
            timeout: DEFAULT_NETWORK_TIMEOUT,
        }
    }

    /// A service with no network capability.
    pub fn offline() -> Self {
        Self {
            client: None,
            timeout: DEFAULT_NETWORK_TIMEOUT,
        }
    }

    /// Override the per-request read timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run a query on the calling thread.
    pub fn get_nearby_places(
        &self,
        query: &NearbyQuery,
        config: &PlacesConfig,
    ) -> Result<NearbyPois, QueryError> {
        let client = self.client()?;
        let url = build_query_url(query, config)?;
        fetch(client.as_ref(), url.as_str(), self.timeout)
    }

    /// Run a query on the blocking pool and await its single result.
    pub async fn get_nearby_places_async(
        &self,
        query: NearbyQuery,
        config: &PlacesConfig,
    ) -> Result<NearbyPois, QueryError> {
        let client = self.client()?;
        let url = build_query_url(&query, config)?;
        let timeout = self.timeout;

        tokio::task::spawn_blocking(move || fetch(client.as_ref(), url.as_str(), timeout))
            .await
            .map_err(|e| QueryError::Unknown(format!("Nearby query task failed: {}", e)))?
    }

    fn client(&self) -> Result<Arc<dyn HttpClient>, QueryError> {
        self.client.clone().ok_or_else(|| {
            QueryError::Connectivity(
                "Unable to get nearby places, no network capability available".to_string(),
            )
        })
    }
}

fn fetch(client: &dyn HttpClient, url: &str, timeout: Duration) -> Result<NearbyPois, QueryError> {
    debug!(url, "Requesting nearby places");

    let response = client
        .send(&HttpRequest::get(url, timeout))
        .map_err(|e| QueryError::Connectivity(format!("Unable to get nearby places: {}", e)))?;

    if !response.is_success() {
        warn!(
            status = response.status,
            message = %response.message,
            "Nearby places request rejected"
        );
        return Err(QueryError::ServerResponse(format!(
            "Unable to get nearby places, connection failed with status {}, message {}",
            response.status, response.message
        )));
    }

    let body = String::from_utf8(response.body).map_err(|_| {
        QueryError::ServerResponse("Nearby places response is not valid UTF-8".to_string())
    })?;

    parse_response(&body)
}

/// Result payload handed back to a host after a query completes.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyPlacesResult {
    pub status: RequestStatus,
    /// Containing POIs first, then nearby. Empty on failure.
    pub pois: Vec<Poi>,
}

const KEY_RESULT_POIS: &str = "nearbypois";
const KEY_RESULT_STATUS: &str = "status";

impl NearbyPlacesResult {
    pub fn to_event_data(&self) -> Map<String, Value> {
        let pois: Vec<Value> = self
            .pois
            .iter()
            .filter_map(|poi| serde_json::to_value(poi).ok())
            .collect();

        let mut data = Map::new();
        data.insert(KEY_RESULT_POIS.to_string(), Value::Array(pois));
        data.insert(KEY_RESULT_STATUS.to_string(), json!(self.status.code()));
        data
    }

    /// Decode a payload produced by [`to_event_data`](Self::to_event_data).
    ///
    /// A payload that cannot be read yields [`RequestStatus::UnknownError`]
    /// and no POIs.
    pub fn from_event_data(data: &Map<String, Value>) -> Self {
        let status = data.get(KEY_RESULT_STATUS).and_then(Value::as_i64);
        let pois = data.get(KEY_RESULT_POIS).and_then(Value::as_array);

        let (Some(code), Some(pois)) = (status, pois) else {
            warn!("Nearby places result payload is malformed");
            return Self::from(Err(QueryError::Unknown(
                "Malformed nearby places result".to_string(),
            )));
        };

        let pois = pois
            .iter()
            .filter_map(|value| match serde_json::from_value::<Poi>(value.clone()) {
                Ok(poi) => Some(poi),
                Err(e) => {
                    warn!(error = %e, "Dropping unreadable POI from result payload");
                    None
                }
            })
            .collect();

        Self {
            status: RequestStatus::from_code(code),
            pois,
        }
    }
}

impl From<Result<NearbyPois, QueryError>> for NearbyPlacesResult {
    fn from(result: Result<NearbyPois, QueryError>) -> Self {
        match result {
            Ok(pois) => Self {
                status: RequestStatus::Ok,
                pois: pois.all(),
            },
            Err(e) => Self {
                status: e.status(),
                pois: Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::http::tests::MockHttpClient;
    use crate::query::http::{HttpError, HttpResponse};

    const BODY: &str = r#"{
        "places": {
            "userWithin": [ { "p": ["in", "Inside", "37.3", "-121.9", "100", "738", "1"] } ],
            "pois": [ { "p": ["out", "Outside", "37.4", "-121.8", "100", "738", "2"] } ]
        }
    }"#;

    fn config() -> PlacesConfig {
        PlacesConfig::new("places.example.com", ["738", "912"]).unwrap()
    }

    fn service(response: Result<HttpResponse, HttpError>) -> (QueryService, Arc<MockHttpClient>) {
        let mock = Arc::new(MockHttpClient::new(response));
        (QueryService::new(mock.clone()), mock)
    }

    #[test]
    fn test_build_query_url() {
        let query = NearbyQuery::new(37.338735, -121.904516).with_count(15);
        let url = build_query_url(&query, &config()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://places.example.com/placesedgequery?latitude=37.338735&longitude=-121.904516&limit=15&library=738&library=912"
        );
    }

    #[test]
    fn test_default_count() {
        let query = NearbyQuery::new(1.0, 2.0);
        assert_eq!(query.count, DEFAULT_NEARBY_COUNT);
        let url = build_query_url(&query, &config()).unwrap();
        assert!(url.as_str().contains("limit=20"));
    }

    #[test]
    fn test_out_of_range_query_location() {
        for (lat, lon) in [(90.5, 0.0), (0.0, -180.5), (f64::NAN, 0.0)] {
            let result = build_query_url(&NearbyQuery::new(lat, lon), &config());
            assert!(matches!(result, Err(QueryError::InvalidLatLong(_))));
        }
    }

    #[test]
    fn test_invalid_location_fails_before_request() {
        let (service, mock) = service(Ok(HttpResponse::ok(BODY)));
        let err = service
            .get_nearby_places(&NearbyQuery::new(100.0, 0.0), &config())
            .unwrap_err();
        assert_eq!(err.status(), RequestStatus::InvalidLatLongError);
        assert!(mock.last_url().is_none());
    }

    #[test]
    fn test_unusable_endpoint() {
        let config = PlacesConfig::new("bad host name", ["1"]).unwrap();
        let result = build_query_url(&NearbyQuery::new(1.0, 2.0), &config);
        assert!(matches!(result, Err(QueryError::InvalidLatLong(_))));
    }

    #[test]
    fn test_success() {
        let (service, mock) = service(Ok(HttpResponse::ok(BODY)));
        let pois = service
            .get_nearby_places(&NearbyQuery::new(37.3, -121.9), &config())
            .unwrap();

        assert_eq!(pois.containing.len(), 1);
        assert_eq!(pois.nearby.len(), 1);
        assert!(mock
            .last_url()
            .unwrap()
            .starts_with("https://places.example.com/placesedgequery?"));
        assert_eq!(mock.requests.lock()[0].timeout, DEFAULT_NETWORK_TIMEOUT);
    }

    #[test]
    fn test_custom_timeout_passed_through() {
        let mock = Arc::new(MockHttpClient::new(Ok(HttpResponse::ok(BODY))));
        let service = QueryService::new(mock.clone()).with_timeout(Duration::from_millis(500));
        service
            .get_nearby_places(&NearbyQuery::new(1.0, 2.0), &config())
            .unwrap();
        assert_eq!(mock.requests.lock()[0].timeout, Duration::from_millis(500));
    }

    #[test]
    fn test_transport_failure_is_connectivity() {
        let (service, _) = service(Err(HttpError::Request("refused".to_string())));
        let err = service
            .get_nearby_places(&NearbyQuery::new(1.0, 2.0), &config())
            .unwrap_err();
        assert_eq!(err.status(), RequestStatus::ConnectivityError);
    }

    #[test]
    fn test_offline_is_connectivity() {
        let err = QueryService::offline()
            .get_nearby_places(&NearbyQuery::new(1.0, 2.0), &config())
            .unwrap_err();
        assert_eq!(err.status(), RequestStatus::ConnectivityError);
    }

    #[test]
    fn test_non_success_status_is_server_error() {
        let response = HttpResponse {
            status: 503,
            message: "Service Unavailable".to_string(),
            body: BODY.as_bytes().to_vec(),
        };
        let (service, _) = service(Ok(response));
        let err = service
            .get_nearby_places(&NearbyQuery::new(1.0, 2.0), &config())
            .unwrap_err();
        assert_eq!(err.status(), RequestStatus::ServerResponseError);
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_empty_body_is_server_error() {
        let (service, _) = service(Ok(HttpResponse::ok("")));
        let err = service
            .get_nearby_places(&NearbyQuery::new(1.0, 2.0), &config())
            .unwrap_err();
        assert_eq!(err.status(), RequestStatus::ServerResponseError);
    }

    #[test]
    fn test_invalid_utf8_is_server_error() {
        let (service, _) = service(Ok(HttpResponse::ok(vec![0xff, 0xfe, 0x00])));
        let err = service
            .get_nearby_places(&NearbyQuery::new(1.0, 2.0), &config())
            .unwrap_err();
        assert_eq!(err.status(), RequestStatus::ServerResponseError);
    }

    #[tokio::test]
    async fn test_async_query() {
        let (service, _) = service(Ok(HttpResponse::ok(BODY)));
        let pois = service
            .get_nearby_places_async(NearbyQuery::new(37.3, -121.9), &config())
            .await
            .unwrap();
        assert_eq!(pois.all().len(), 2);
    }

    #[tokio::test]
    async fn test_async_offline() {
        let err = QueryService::offline()
            .get_nearby_places_async(NearbyQuery::new(37.3, -121.9), &config())
            .await
            .unwrap_err();
        assert_eq!(err.status(), RequestStatus::ConnectivityError);
    }

    #[test]
    fn test_result_from_success() {
        let pois = parse_response(BODY).unwrap();
        let result = NearbyPlacesResult::from(Ok(pois));
        assert_eq!(result.status, RequestStatus::Ok);
        assert_eq!(result.pois[0].identifier(), "in");
        assert_eq!(result.pois[1].identifier(), "out");
    }

    #[test]
    fn test_result_from_failure() {
        let result = NearbyPlacesResult::from(Err(QueryError::Configuration("x".into())));
        assert_eq!(result.status, RequestStatus::ConfigurationError);
        assert!(result.pois.is_empty());
    }

    #[test]
    fn test_result_event_data() {
        let result = NearbyPlacesResult::from(Ok(parse_response(BODY).unwrap()));
        let data = result.to_event_data();
        assert_eq!(data["status"], json!(0));
        assert_eq!(data["nearbypois"][0]["regionid"], json!("in"));

        assert_eq!(NearbyPlacesResult::from_event_data(&data), result);
    }

    #[test]
    fn test_malformed_result_is_unknown() {
        let mut data = Map::new();
        data.insert("status".to_string(), json!("fine"));
        let result = NearbyPlacesResult::from_event_data(&data);
        assert_eq!(result.status, RequestStatus::UnknownError);
        assert!(result.pois.is_empty());
    }
}
