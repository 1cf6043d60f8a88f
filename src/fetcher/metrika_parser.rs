//! Logs API response parser
//!
//! Stateless helpers that pull the few fields the downloader needs out of the
//! `log_request` envelope and out of error bodies.

use serde::Deserialize;

use crate::fetcher::{FetcherError, FetcherResult};

/// Fallback when an error body carries no readable message
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Top-level shape of create and status responses
#[derive(Debug, Deserialize)]
struct Envelope {
    log_request: Option<LogRequestBody>,
}

/// Fields of `log_request` the downloader reads; everything else is ignored
#[derive(Debug, Deserialize)]
struct LogRequestBody {
    #[serde(default)]
    request_id: Option<RequestId>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RequestId {
    Number(serde_json::Number),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Stateless parser for Logs API responses
pub struct MetrikaParser;

impl MetrikaParser {
    /// Extract `log_request.request_id` from a create response
    ///
    /// The API returns a number; string ids are accepted when they consist of
    /// ASCII letters, digits, `-` or `_`, since the id becomes a path segment.
    ///
    /// # Errors
    /// Returns [`FetcherError::ParseError`] if the body is not JSON or the id is missing or malformed
    pub fn parse_request_id(body: &[u8]) -> FetcherResult<String> {
        match Self::log_request(body)?.request_id {
            Some(RequestId::Number(n)) => Ok(n.to_string()),
            Some(RequestId::Text(s)) if is_path_safe(&s) => Ok(s),
            Some(RequestId::Text(s)) => Err(FetcherError::ParseError(format!(
                "Invalid request_id: {s:?}"
            ))),
            None => Err(FetcherError::ParseError(
                "Missing log_request.request_id".to_string(),
            )),
        }
    }

    /// Extract `log_request.status` from a status response
    ///
    /// # Errors
    /// Returns [`FetcherError::ParseError`] if the body is not JSON or the status is missing
    pub fn parse_status(body: &[u8]) -> FetcherResult<String> {
        Self::log_request(body)?
            .status
            .ok_or_else(|| FetcherError::ParseError("Missing log_request.status".to_string()))
    }

    /// Extract the top-level `message` from an error body
    ///
    /// Never fails: anything unreadable yields [`UNKNOWN_ERROR`].
    pub fn parse_error_message(body: &[u8]) -> String {
        serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
    }

    fn log_request(body: &[u8]) -> FetcherResult<LogRequestBody> {
        let envelope: Envelope = serde_json::from_slice(body)
            .map_err(|e| FetcherError::ParseError(format!("Invalid JSON response: {e}")))?;

        envelope
            .log_request
            .ok_or_else(|| FetcherError::ParseError("Missing log_request object".to_string()))
    }
}

fn is_path_safe(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
