//! HTTP client abstraction for testability

use std::time::Duration;

use thiserror::Error;

/// Default connect and read timeout for nearby queries.
pub const DEFAULT_NETWORK_TIMEOUT: Duration = Duration::from_secs(2);

/// Transport-level failure. Any of these means no usable response arrived.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Failed to read response: {0}")]
    Body(String),
}

/// A GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}

/// A completed response, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Reason phrase for the status, possibly empty.
    pub message: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            message: "OK".to_string(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait HttpClient: Send + Sync {
    /// Performs the request. Non-2xx statuses are returned as responses,
    /// not errors.
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError>;
}

/// Real HTTP client implementation using reqwest.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with the default connect timeout.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_connect_timeout(DEFAULT_NETWORK_TIMEOUT)
    }

    /// Creates a new ReqwestClient with a custom connect timeout.
    ///
    /// The read timeout is taken per request from [`HttpRequest::timeout`].
    pub fn with_connect_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(timeout)
            .build()
            .map_err(|e| HttpError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        let response = self
            .client
            .get(&request.url)
            .timeout(request.timeout)
            .send()
            .map_err(|e| HttpError::Request(e.to_string()))?;

        let status = response.status();
        let message = status.canonical_reason().unwrap_or_default().to_string();

        let body = response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| HttpError::Body(e.to_string()))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            message,
            body,
        })
    }
}
