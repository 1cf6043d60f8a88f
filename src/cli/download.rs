//! Download command implementation

use chrono::{Local, NaiveDate};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use super::CliError;
use crate::downloader::{DownloadExecutor, DownloadResult, PollConfig};
use crate::fetcher::metrika_config::METRIKA_LOGS_API;
use crate::fetcher::metrika_http::MetrikaHttpClient;
use crate::fetcher::LogsApiClient;
use crate::{parse_date, DateRange, Source};

/// Default API host
pub const DEFAULT_API_URL: &str = METRIKA_LOGS_API.base_url;

/// Maximum polling budget accepted on the command line (one day)
const MAX_TIMEOUT_MINS: u64 = 24 * 60;

/// Download Yandex Metrika logs for a date range
#[derive(Parser, Debug)]
#[command(name = "metrika-logs-downloader", version, about)]
pub struct Cli {
    /// Yandex Metrika counter ID
    pub counter_id: String,

    /// Yandex Metrika OAuth token
    pub auth_token: String,

    /// Start date in YYYY-MM-DD format (default: day before yesterday)
    #[arg(value_parser = parse_date, requires = "end_date")]
    pub start_date: Option<NaiveDate>,

    /// End date in YYYY-MM-DD format (default: yesterday)
    #[arg(value_parser = parse_date)]
    pub end_date: Option<NaiveDate>,

    /// Output directory
    #[arg(long, default_value = "data")]
    pub output_dir: PathBuf,

    /// Data source type: visits or hits
    #[arg(long, default_value = "visits")]
    pub source: Source,

    /// Minutes to wait for the log request to be processed
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u64).range(1..=MAX_TIMEOUT_MINS))]
    pub timeout_mins: u64,

    /// Logs API host
    #[arg(long, default_value = DEFAULT_API_URL, hide = true)]
    pub api_url: String,
}

impl Cli {
    /// Resolve the requested range, defaulting to yesterday's range relative to `today`
    pub fn resolve_date_range(&self, today: NaiveDate) -> Result<DateRange, CliError> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => DateRange::new(start, end).map_err(CliError::InvalidArgument),
            (None, None) => Ok(DateRange::yesterday(today)),
            _ => Err(CliError::InvalidArgument(
                "Both start_date and end_date must be provided together".to_string(),
            )),
        }
    }

    /// Polling parameters from the command line
    pub fn poll_config(&self) -> PollConfig {
        PollConfig::from_minutes(self.timeout_mins)
    }

    /// Run the download against the configured API host
    pub fn execute(&self) -> Result<DownloadResult, CliError> {
        let range = self.resolve_date_range(Local::now().date_naive())?;
        println!("Processing {} data from {} to {}", self.source, range.date1(), range.date2());

        let transport = MetrikaHttpClient::new(self.api_url.as_str())?;
        let client = LogsApiClient::new(transport, self.counter_id.as_str(), self.auth_token.as_str());
        let executor = DownloadExecutor::new(client, self.poll_config());

        info!(api_url = %self.api_url, output_dir = %self.output_dir.display(), "Starting download");
        let saved = executor.execute(&range, self.source, &self.output_dir)?;
        Ok(saved)
    }
}
