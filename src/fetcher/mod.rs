//! Remote Logs API access
//!
//! The [`HttpTransport`] trait is the seam between the log request state
//! machine and the network. [`metrika_http::MetrikaHttpClient`] is the real
//! blocking HTTPS implementation; tests substitute scripted transports.
//! [`LogsApiClient`] binds a transport to a counter and token and exposes one
//! method per remote operation. It never interprets status codes.

use reqwest::Method;
use tracing::debug;

use crate::metrics::HttpRequestMetrics;

pub mod metrika_config;
pub mod metrika_http;
pub mod metrika_parser;


use metrika_config::{MetrikaApiConfig, METRIKA_LOGS_API};

/// Fetcher errors
#[derive(Debug, thiserror::Error)]
pub enum FetcherError {
    /// Connection, TLS or timeout failure before a status was received
    #[error("network error: {0}")]
    NetworkError(String),

    /// Response body could not be decoded
    #[error("parse error: {0}")]
    ParseError(String),

    /// HTTP client could not be configured
    #[error("client configuration error: {0}")]
    ConfigurationError(String),
}

/// Result type for fetcher operations
pub type FetcherResult<T> = Result<T, FetcherError>;

/// Raw response of a single API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Full response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a response from status and body
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for `200 OK`, the only status the Logs API uses for success
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Standard reason phrase for the status code, if any
    pub fn reason(&self) -> &'static str {
        reqwest::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown status")
    }
}

/// A single authenticated request/response exchange with the API host
///
/// Implementations perform exactly one call per invocation. Non-2xx statuses
/// are returned as responses, not errors; only failures that prevent a
/// response from being received are errors.
pub trait HttpTransport {
    /// Send `method` to `path_and_query` (already encoded) with the OAuth `token`
    fn send(&self, method: Method, path_and_query: &str, token: &str)
        -> FetcherResult<HttpResponse>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn send(
        &self,
        method: Method,
        path_and_query: &str,
        token: &str,
    ) -> FetcherResult<HttpResponse> {
        (**self).send(method, path_and_query, token)
    }
}

/// Logs API operations for one counter
pub struct LogsApiClient<T> {
    transport: T,
    counter_id: String,
    token: String,
    api: &'static MetrikaApiConfig,
}

impl<T: HttpTransport> LogsApiClient<T> {
    /// Create a client for `counter_id` authenticated with `token`
    pub fn new(transport: T, counter_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            transport,
            counter_id: counter_id.into(),
            token: token.into(),
            api: &METRIKA_LOGS_API,
        }
    }

    /// Counter the client operates on
    pub fn counter_id(&self) -> &str {
        &self.counter_id
    }

    /// Check that counter id and token are usable
    pub fn validate_credentials(&self) -> Result<(), String> {
        if self.counter_id.is_empty() || self.token.is_empty() {
            return Err("counter_id and auth_token are required".to_string());
        }
        if !self.counter_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!(
                "counter_id must be numeric, got '{}'",
                self.counter_id
            ));
        }
        Ok(())
    }

    /// POST a new log request; `query` is the encoded query string
    pub fn create_log_request(&self, query: &str) -> FetcherResult<HttpResponse> {
        let path = format!("{}?{}", self.api.create_path(&self.counter_id), query);
        self.send("create", Method::POST, &path)
    }

    /// GET the current state of a log request
    pub fn log_request_status(&self, request_id: &str) -> FetcherResult<HttpResponse> {
        let path = self.api.status_path(&self.counter_id, request_id);
        self.send("status", Method::GET, &path)
    }

    /// GET the content of one prepared part
    pub fn download_part(&self, request_id: &str, part: u32) -> FetcherResult<HttpResponse> {
        let path = self.api.download_path(&self.counter_id, request_id, part);
        self.send("download", Method::GET, &path)
    }

    /// POST a clean request, releasing the prepared data on the server
    pub fn clean_log_request(&self, request_id: &str) -> FetcherResult<HttpResponse> {
        let path = self.api.clean_path(&self.counter_id, request_id);
        self.send("clean", Method::POST, &path)
    }

    fn send(&self, endpoint: &'static str, method: Method, path: &str) -> FetcherResult<HttpResponse> {
        debug!(endpoint, %method, path, "Calling Logs API");
        let metrics = HttpRequestMetrics::start(endpoint);

        match self.transport.send(method, path, &self.token) {
            Ok(response) => {
                metrics.record_complete(response.status);
                Ok(response)
            }
            Err(e) => {
                metrics.record_network_error();
                Err(e)
            }
        }
    }
}
