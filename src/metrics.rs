//! Observability metrics for log downloads
//!
//! Emitted through the `metrics` facade. The CLI installs no recorder, so
//! these are no-ops there; an embedding application can install any
//! `metrics` exporter and call [`describe_metrics`] once at startup.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::downloader::{DownloadError, JobStatus};
use crate::{DateRange, Source};

/// Correlation ID generator for request tracing
static CORRELATION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Register metric descriptions with the installed recorder
pub fn describe_metrics() {
    describe_counter!(
        "http_requests_total",
        Unit::Count,
        "Total number of HTTP requests made to the Logs API"
    );
    describe_histogram!(
        "http_request_duration_seconds",
        Unit::Seconds,
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "log_request_polls_total",
        Unit::Count,
        "Status checks performed while waiting for log requests"
    );
    describe_counter!(
        "downloads_completed_total",
        Unit::Count,
        "Total number of log exports saved"
    );
    describe_counter!(
        "downloads_failed_total",
        Unit::Count,
        "Total number of failed log downloads"
    );
    describe_counter!(
        "download_bytes_total",
        Unit::Bytes,
        "Bytes of log exports written to disk"
    );
    describe_counter!(
        "cleanup_failures_total",
        Unit::Count,
        "Log requests that could not be cleaned on the server"
    );
}

/// Generate a new correlation ID for request tracing
pub fn generate_correlation_id() -> String {
    let id = CORRELATION_COUNTER.fetch_add(1, Ordering::Relaxed) + 1;
    format!("req-{id:08x}")
}

/// Record an HTTP request with timing
pub struct HttpRequestMetrics {
    endpoint: &'static str,
    start_time: Instant,
    correlation_id: String,
}

impl HttpRequestMetrics {
    /// Start recording a request to `endpoint` (create, status, download, clean)
    pub fn start(endpoint: &'static str) -> Self {
        let correlation_id = generate_correlation_id();
        debug!(correlation_id = %correlation_id, endpoint, "Starting HTTP request");

        Self {
            endpoint,
            start_time: Instant::now(),
            correlation_id,
        }
    }

    /// Record completion with a status code
    pub fn record_complete(&self, status_code: u16) {
        let duration = self.start_time.elapsed();

        counter!(
            "http_requests_total",
            "endpoint" => self.endpoint,
            "status" => status_code.to_string(),
        )
        .increment(1);
        histogram!("http_request_duration_seconds", "endpoint" => self.endpoint)
            .record(duration.as_secs_f64());

        debug!(
            correlation_id = %self.correlation_id,
            endpoint = self.endpoint,
            status = status_code,
            duration_ms = duration.as_millis() as u64,
            "HTTP request completed"
        );
    }

    /// Record a request that produced no status code
    pub fn record_network_error(&self) {
        let duration = self.start_time.elapsed();

        counter!(
            "http_requests_total",
            "endpoint" => self.endpoint,
            "status" => "network_error",
        )
        .increment(1);
        histogram!("http_request_duration_seconds", "endpoint" => self.endpoint)
            .record(duration.as_secs_f64());

        warn!(
            correlation_id = %self.correlation_id,
            endpoint = self.endpoint,
            duration_ms = duration.as_millis() as u64,
            "Network error recorded"
        );
    }

    /// Correlation ID for this request
    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }
}

/// Count one status check
pub fn record_poll_attempt(status: &JobStatus) {
    counter!("log_request_polls_total", "status" => status.as_str().to_string()).increment(1);
}

/// Count a cleanup that did not succeed
pub fn record_cleanup_failure() {
    counter!("cleanup_failures_total").increment(1);
}

/// Download metrics for one log request
pub struct DownloadMetrics {
    source: Source,
    range: String,
    start_time: Instant,
}

impl DownloadMetrics {
    /// Start tracking a download
    pub fn start(source: Source, range: &DateRange) -> Self {
        let range = range.to_string();
        info!(source = %source, range = %range, "Download started");

        Self {
            source,
            range,
            start_time: Instant::now(),
        }
    }

    /// Record a saved export
    pub fn record_success(&self, bytes: usize) {
        let duration = self.start_time.elapsed();

        counter!("downloads_completed_total", "source" => self.source.as_str()).increment(1);
        counter!("download_bytes_total", "source" => self.source.as_str()).increment(bytes as u64);

        info!(
            source = %self.source,
            range = %self.range,
            bytes,
            duration_secs = duration.as_secs(),
            "Download completed successfully"
        );
    }

    /// Record a failed download
    pub fn record_failure(&self, error: &DownloadError) {
        let duration = self.start_time.elapsed();

        counter!(
            "downloads_failed_total",
            "source" => self.source.as_str(),
            "error" => error.kind(),
        )
        .increment(1);

        error!(
            source = %self.source,
            range = %self.range,
            error = %error,
            duration_secs = duration.as_secs(),
            "Download failed"
        );
    }
}
