//! Log request creation

use tracing::{debug, info};
use url::form_urlencoded;

use super::{DownloadError, ExportJob};
use crate::fetcher::metrika_config::{source_profile, SourceProfile};
use crate::fetcher::metrika_parser::MetrikaParser;
use crate::fetcher::{HttpTransport, LogsApiClient};
use crate::{DateRange, Source};

/// Encode the create-request query: `date1`, `date2`, `source`, `fields`
pub fn build_create_query(range: &DateRange, profile: &SourceProfile) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("date1", &range.date1())
        .append_pair("date2", &range.date2())
        .append_pair("source", profile.source.as_str())
        .append_pair("fields", &profile.fields_param())
        .finish()
}

/// Submit a log request for `range` and `source`
///
/// Unsupported sources are rejected before anything is sent.
///
/// # Errors
/// - [`DownloadError::UnsupportedSource`] if `source` has no field profile
/// - [`DownloadError::Api`] for any status other than 200
/// - [`DownloadError::Fetcher`] on network failure or an unreadable response
pub fn create_request<T: HttpTransport>(
    client: &LogsApiClient<T>,
    range: &DateRange,
    source: Source,
) -> Result<ExportJob, DownloadError> {
    let profile = source_profile(source).ok_or(DownloadError::UnsupportedSource(source))?;
    let query = build_create_query(range, profile);
    debug!(fields = profile.fields.len(), "Creating {} log request for {}", source, range);

    let response = client.create_log_request(&query)?;
    if !response.is_ok() {
        return Err(DownloadError::Api {
            operation: "create",
            status: response.status,
            message: MetrikaParser::parse_error_message(&response.body),
        });
    }

    let request_id = MetrikaParser::parse_request_id(&response.body)?;
    info!(request_id = %request_id, "Created log request");

    Ok(ExportJob {
        request_id,
        counter_id: client.counter_id().to_string(),
        date_range: *range,
        source,
        fields: profile.fields.iter().map(|f| f.to_string()).collect(),
    })
}
