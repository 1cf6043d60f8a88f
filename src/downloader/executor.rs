//! Download executor: request, poll, download, cleanup

use std::path::Path;
use tracing::{info, warn};

use super::cleanup::cleanup_request;
use super::download::download_and_save;
use super::poller::wait_for_request;
use super::request::create_request;
use super::{DownloadError, DownloadResult, ExportJob, PollConfig};
use crate::fetcher::metrika_config::source_profile;
use crate::fetcher::{HttpTransport, LogsApiClient};
use crate::metrics::DownloadMetrics;
use crate::{DateRange, Source};

/// Runs one log request end to end
pub struct DownloadExecutor<T> {
    client: LogsApiClient<T>,
    poll: PollConfig,
    cleanup_on_failure: bool,
}

impl<T: HttpTransport> DownloadExecutor<T> {
    /// Create an executor; cleanup after a failed poll or download is enabled
    pub fn new(client: LogsApiClient<T>, poll: PollConfig) -> Self {
        Self {
            client,
            poll,
            cleanup_on_failure: true,
        }
    }

    /// Whether to clean an already created log request when a later step fails
    pub fn with_cleanup_on_failure(mut self, enabled: bool) -> Self {
        self.cleanup_on_failure = enabled;
        self
    }

    /// Download `source` logs for `range` into `output_dir`
    ///
    /// Input is validated before any network call. Once the log request
    /// exists, a successful download is always followed by a cleanup attempt
    /// whose failure is only logged.
    ///
    /// # Errors
    /// Any [`DownloadError`] from validation, request creation, polling or download
    pub fn execute(
        &self,
        range: &DateRange,
        source: Source,
        output_dir: &Path,
    ) -> Result<DownloadResult, DownloadError> {
        self.client
            .validate_credentials()
            .map_err(DownloadError::InvalidInput)?;
        if source_profile(source).is_none() {
            return Err(DownloadError::UnsupportedSource(source));
        }

        let metrics = DownloadMetrics::start(source, range);
        let result = self.run(range, source, output_dir);
        match &result {
            Ok(saved) => metrics.record_success(saved.bytes),
            Err(e) => metrics.record_failure(e),
        }
        result
    }

    fn run(
        &self,
        range: &DateRange,
        source: Source,
        output_dir: &Path,
    ) -> Result<DownloadResult, DownloadError> {
        let job = create_request(&self.client, range, source)?;
        info!("Created request ID: {}", job.request_id);

        match self.fetch(&job, output_dir) {
            Ok(saved) => {
                cleanup_request(&self.client, &job.request_id);
                Ok(saved)
            }
            Err(e) => {
                if self.cleanup_on_failure {
                    warn!(
                        request_id = %job.request_id,
                        error = %e,
                        "Download failed, cleaning up log request"
                    );
                    cleanup_request(&self.client, &job.request_id);
                } else {
                    warn!(
                        request_id = %job.request_id,
                        "Download failed, log request left on the server"
                    );
                }
                Err(e)
            }
        }
    }

    fn fetch(&self, job: &ExportJob, output_dir: &Path) -> Result<DownloadResult, DownloadError> {
        let outcome = wait_for_request(&self.client, job, &self.poll)?;
        info!(
            attempts = outcome.attempts,
            elapsed_secs = outcome.elapsed.as_secs(),
            "Downloading data"
        );

        let saved = download_and_save(&self.client, job, output_dir)?;
        info!("Successfully saved to: {}", saved.path.display());
        Ok(saved)
    }
}
