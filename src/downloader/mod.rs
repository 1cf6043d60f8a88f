//! Log request orchestration
//!
//! A download walks one log request through its whole life on the server:
//!
//! 1. **Request**: [`request::create_request`] submits the export job
//! 2. **Poll**: [`poller::wait_for_request`] checks its status at a fixed interval
//! 3. **Download**: [`download::download_and_save`] fetches part 0 and writes it to disk
//! 4. **Cleanup**: [`cleanup::cleanup_request`] releases the job, best-effort
//!
//! [`executor::DownloadExecutor`] sequences the steps and decides what happens
//! to an already created job when a later step fails.
//!
//! # Quick Start
//!
//! ```no_run
//! use metrika_logs_downloader::downloader::{DownloadExecutor, PollConfig};
//! use metrika_logs_downloader::fetcher::{LogsApiClient, metrika_http::MetrikaHttpClient};
//! use metrika_logs_downloader::{DateRange, Source};
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = LogsApiClient::new(MetrikaHttpClient::with_default_host()?, "12345", "token");
//! let poll = PollConfig::default().with_timeout(Duration::from_secs(15 * 60));
//! let executor = DownloadExecutor::new(client, poll);
//!
//! let range = DateRange::parse("2024-03-01", "2024-03-02")?;
//! let saved = executor.execute(&range, Source::Visits, "data".as_ref())?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Every step returns `Result<_, DownloadError>`. Nothing is retried except the
//! status check inside the polling loop. Cleanup failures are logged and never
//! surface as errors.

use std::time::Duration;

use crate::fetcher::FetcherError;
use crate::output::OutputError;
use crate::Source;

pub mod cleanup;
pub mod config;
pub mod download;
pub mod executor;
pub mod job;
pub mod poller;
pub mod request;

pub use config::PollConfig;
pub use executor::DownloadExecutor;
pub use job::{DownloadResult, ExportJob, JobStatus, PollOutcome};

/// Download errors
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// Missing or malformed caller input, rejected before any network call
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Source kind without a field profile
    #[error("{0} source is not implemented yet")]
    UnsupportedSource(Source),

    /// Non-success HTTP status from the API
    #[error("API error {status} on {operation}: {message}")]
    Api {
        /// Remote operation that was rejected (create, status, download)
        operation: &'static str,
        /// HTTP status code
        status: u16,
        /// Message reported by the API
        message: String,
    },

    /// Log request reached a terminal failure status
    #[error("log request {request_id} failed: {status}")]
    JobFailed {
        /// Remote request id
        request_id: String,
        /// Terminal status observed
        status: JobStatus,
    },

    /// Polling budget exhausted before the log request was processed
    #[error("timeout after {} seconds ({attempts} attempts)", .elapsed.as_secs())]
    Timeout {
        /// Status checks performed
        attempts: u32,
        /// Time spent polling
        elapsed: Duration,
    },

    /// Downloaded content below the minimum plausible size
    #[error("downloaded file appears to be empty ({bytes} bytes)")]
    EmptyResult {
        /// Size of the rejected body
        bytes: usize,
    },

    /// Local output failure
    #[error("output error: {0}")]
    Output(#[from] OutputError),

    /// Transport or parse failure
    #[error("fetcher error: {0}")]
    Fetcher(#[from] FetcherError),
}

impl DownloadError {
    /// Short label for metrics
    pub fn kind(&self) -> &'static str {
        match self {
            DownloadError::InvalidInput(_) => "invalid_input",
            DownloadError::UnsupportedSource(_) => "unsupported_source",
            DownloadError::Api { .. } => "api",
            DownloadError::JobFailed { .. } => "job_failed",
            DownloadError::Timeout { .. } => "timeout",
            DownloadError::EmptyResult { .. } => "empty_result",
            DownloadError::Output(_) => "output",
            DownloadError::Fetcher(_) => "fetcher",
        }
    }
}
