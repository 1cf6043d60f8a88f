//! Best-effort log request cleanup

use tracing::{info, warn};

use crate::fetcher::{HttpTransport, LogsApiClient};
use crate::metrics;

/// Ask the server to clean `request_id`
///
/// Failures are logged as warnings and reported through the return value
/// only; an orphaned log request does not affect files already saved.
pub fn cleanup_request<T: HttpTransport>(client: &LogsApiClient<T>, request_id: &str) -> bool {
    match client.clean_log_request(request_id) {
        Ok(response) if response.is_ok() => {
            info!(request_id, "Cleaned log request");
            true
        }
        Ok(response) => {
            warn!(
                request_id,
                status = response.status,
                "Warning: Cleanup failed for request {}",
                request_id
            );
            metrics::record_cleanup_failure();
            false
        }
        Err(e) => {
            warn!(request_id, error = %e, "Warning: Cleanup failed for request {}", request_id);
            metrics::record_cleanup_failure();
            false
        }
    }
}
