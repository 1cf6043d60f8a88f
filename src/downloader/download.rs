//! Download of a processed log request

use std::path::Path;
use tracing::{debug, info};

use super::config::{DOWNLOAD_PART, MIN_CONTENT_BYTES};
use super::{DownloadError, DownloadResult, ExportJob};
use crate::fetcher::metrika_parser::{MetrikaParser, UNKNOWN_ERROR};
use crate::fetcher::{HttpTransport, LogsApiClient};
use crate::output::{self, OutputPathBuilder};

/// Download part 0 of `job` and save it under `output_dir`
///
/// The request id identifies the data; the job's source and date range only
/// name the file.
///
/// # Errors
/// - [`DownloadError::Api`] for any status other than 200
/// - [`DownloadError::EmptyResult`] if the body is shorter than [`MIN_CONTENT_BYTES`]
/// - [`DownloadError::Output`] if the directory cannot be created or the file written
pub fn download_and_save<T: HttpTransport>(
    client: &LogsApiClient<T>,
    job: &ExportJob,
    output_dir: &Path,
) -> Result<DownloadResult, DownloadError> {
    let response = client.download_part(&job.request_id, DOWNLOAD_PART)?;

    if !response.is_ok() {
        let mut message = MetrikaParser::parse_error_message(&response.body);
        if message == UNKNOWN_ERROR {
            message = response.reason().to_string();
        }
        return Err(DownloadError::Api {
            operation: "download",
            status: response.status,
            message,
        });
    }

    let bytes = response.body.len();
    if bytes < MIN_CONTENT_BYTES {
        return Err(DownloadError::EmptyResult { bytes });
    }
    debug!(request_id = %job.request_id, bytes, "Downloaded log request content");

    let builder = OutputPathBuilder::new(output_dir.to_path_buf(), job.source, job.date_range);
    builder.ensure_directories()?;

    let path = builder.build();
    output::write_file(&path, &response.body)?;
    info!(path = %path.display(), bytes, "Saved log export");

    Ok(DownloadResult { path, bytes })
}
