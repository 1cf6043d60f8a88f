//! Blocking HTTPS adapter for the Logs API
//!
//! Each call opens its own connection: idle pooling is disabled, so nothing
//! is kept alive between the create, status, download and clean calls.

use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use tracing::{debug, warn};

use super::metrika_config::{MetrikaApiConfig, CONNECT_TIMEOUT, METRIKA_LOGS_API, REQUEST_TIMEOUT};
use super::{FetcherError, FetcherResult, HttpResponse, HttpTransport};

/// HTTP transport bound to a single API host
pub struct MetrikaHttpClient {
    client: Client,
    base_url: String,
    api: &'static MetrikaApiConfig,
}

impl MetrikaHttpClient {
    /// Create a client for `base_url` (scheme and host, no trailing path)
    ///
    /// # Errors
    /// Returns [`FetcherError::ConfigurationError`] if the TLS backend cannot be initialised
    pub fn new(base_url: impl Into<String>) -> FetcherResult<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .pool_max_idle_per_host(0)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetcherError::ConfigurationError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api: &METRIKA_LOGS_API,
        })
    }

    /// Client for the production API host
    pub fn with_default_host() -> FetcherResult<Self> {
        Self::new(METRIKA_LOGS_API.base_url)
    }

    /// Host this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl HttpTransport for MetrikaHttpClient {
    fn send(
        &self,
        method: Method,
        path_and_query: &str,
        token: &str,
    ) -> FetcherResult<HttpResponse> {
        let url = format!("{}{}", self.base_url, path_and_query);

        let response = self
            .client
            .request(method.clone(), &url)
            .header(AUTHORIZATION, self.api.authorization(token))
            .send()
            .map_err(|e| {
                warn!("Network error on {} {}: {}", method, path_and_query, e);
                FetcherError::NetworkError(e.to_string())
            })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| FetcherError::NetworkError(format!("Failed to read response body: {e}")))?;

        debug!(
            status,
            bytes = body.len(),
            "{} {} completed",
            method,
            path_and_query
        );
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}
