//! Log request status polling
//!
//! Bounded loop with a fixed interval between status checks. It ends on
//! `processed`, on a terminal failure status or when the wall-clock budget
//! is spent.

use std::thread;
use std::time::Instant;
use tracing::{debug, info};

use super::{DownloadError, ExportJob, JobStatus, PollConfig, PollOutcome};
use crate::fetcher::metrika_parser::MetrikaParser;
use crate::fetcher::{HttpTransport, LogsApiClient};
use crate::metrics;

/// Fetch the current status of a log request
///
/// # Errors
/// [`DownloadError::Api`] for a non-200 response, [`DownloadError::Fetcher`]
/// for network or parse failures. Neither is retried.
pub fn check_status<T: HttpTransport>(
    client: &LogsApiClient<T>,
    request_id: &str,
) -> Result<JobStatus, DownloadError> {
    let response = client.log_request_status(request_id)?;
    if !response.is_ok() {
        return Err(DownloadError::Api {
            operation: "status",
            status: response.status,
            message: MetrikaParser::parse_error_message(&response.body),
        });
    }

    let raw = MetrikaParser::parse_status(&response.body)?;
    Ok(JobStatus::from_remote(&raw))
}

/// Poll until `job` is processed
///
/// # Errors
/// - [`DownloadError::JobFailed`] as soon as `canceled` or `failed` is observed
/// - [`DownloadError::Timeout`] when `config.timeout` elapses first
/// - any error from [`check_status`]
pub fn wait_for_request<T: HttpTransport>(
    client: &LogsApiClient<T>,
    job: &ExportJob,
    config: &PollConfig,
) -> Result<PollOutcome, DownloadError> {
    info!(
        request_id = %job.request_id,
        timeout_secs = config.timeout.as_secs(),
        "Waiting for log request to be processed"
    );

    let started = Instant::now();
    let mut attempts: u32 = 0;

    while started.elapsed() < config.timeout {
        attempts += 1;
        let status = check_status(client, &job.request_id)?;
        metrics::record_poll_attempt(&status);
        info!(attempt = attempts, status = %status, "Attempt {}: status={}", attempts, status);

        if status.is_failure() {
            return Err(DownloadError::JobFailed {
                request_id: job.request_id.clone(),
                status,
            });
        }
        if status.is_terminal() {
            let elapsed = started.elapsed();
            info!("Request processed after {} attempts", attempts);
            return Ok(PollOutcome { attempts, elapsed });
        }

        let remaining = config.timeout.saturating_sub(started.elapsed());
        if remaining.is_zero() {
            break;
        }
        let pause = config.interval.min(remaining);
        debug!("Sleeping {:?} before next status check", pause);
        thread::sleep(pause);
    }

    Err(DownloadError::Timeout {
        attempts,
        elapsed: started.elapsed(),
    })
}
