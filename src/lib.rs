//! # Metrika Logs Downloader Library
//!
//! Downloads raw analytics logs from the Yandex Metrika Logs API for a date
//! range. The remote API works with asynchronous export jobs ("log requests"),
//! so a download is a small state machine:
//!
//! 1. create a log request for a date range, source and field list
//! 2. poll its status until it is processed (or fails, or the local budget runs out)
//! 3. download the prepared part and save it as a CSV file
//! 4. clean the log request on the server
//!
//! ## Quick Start
//!
//! ```no_run
//! use metrika_logs_downloader::downloader::{DownloadExecutor, PollConfig};
//! use metrika_logs_downloader::fetcher::{LogsApiClient, metrika_http::MetrikaHttpClient};
//! use metrika_logs_downloader::{DateRange, Source};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = MetrikaHttpClient::with_default_host()?;
//! let client = LogsApiClient::new(transport, "12345", "oauth-token");
//! let executor = DownloadExecutor::new(client, PollConfig::default());
//!
//! let range = DateRange::parse("2024-03-01", "2024-03-02")?;
//! let saved = executor.execute(&range, Source::Visits, Path::new("data"))?;
//! println!("saved {} bytes to {}", saved.bytes, saved.path.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`fetcher`] - HTTP adapter, endpoint tables and response parsing
//! - [`downloader`] - requester, poller, downloader, cleanup and the executor sequencing them
//! - [`output`] - output file naming and persistence
//! - [`cli`] - command line surface used by the binary
//! - [`metrics`] - counters and histograms emitted along the way
//!
//! Everything is synchronous: one job is in flight per invocation and the only
//! waits are network calls and the fixed sleep between status checks.

#![warn(missing_docs)]
#![warn(clippy::all)]

use chrono::NaiveDate;
use std::str::FromStr;

/// CLI command implementation
pub mod cli;

/// Log request orchestration
pub mod downloader;

/// Remote API access
pub mod fetcher;

/// Observability metrics
pub mod metrics;

/// Output file handling
pub mod output;

/// Date format accepted for range bounds
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Category of analytics data exported by the Logs API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Sessions (`ym:s:*` fields)
    Visits,
    /// Page views and events (`ym:pv:*` fields)
    Hits,
}

impl Source {
    /// All source kinds known to the remote API
    pub const ALL: [Source; 2] = [Source::Visits, Source::Hits];

    /// Name used by the remote API and in output filenames
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Visits => "visits",
            Source::Hits => "hits",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "visits" => Ok(Source::Visits),
            "hits" => Ok(Source::Hits),
            _ => Err(format!(
                "Invalid source: {s}. Must be one of: visits, hits"
            )),
        }
    }
}

/// Inclusive range of calendar dates covered by a log request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting an end date before the start date
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, String> {
        if end < start {
            return Err(format!(
                "End date ({end}) must be after or equal to start date ({start})"
            ));
        }
        Ok(Self { start, end })
    }

    /// Parse both bounds from `YYYY-MM-DD` strings
    pub fn parse(start: &str, end: &str) -> Result<Self, String> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// The default range: day before yesterday through yesterday
    pub fn yesterday(today: NaiveDate) -> Self {
        let end = today.pred_opt().unwrap_or(today);
        let start = end.pred_opt().unwrap_or(end);
        Self { start, end }
    }

    /// First day of the range
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range (inclusive)
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Start date as sent to the API (`date1`)
    pub fn date1(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    /// End date as sent to the API (`date2`)
    pub fn date2(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.date1(), self.date2())
    }
}

/// Parse a strict `YYYY-MM-DD` date (zero-padded, real calendar day)
pub fn parse_date(input: &str) -> Result<NaiveDate, String> {
    let well_formed = input.len() == 10
        && input.char_indices().all(|(i, c)| match i {
            4 | 7 => c == '-',
            _ => c.is_ascii_digit(),
        });
    if !well_formed {
        return Err(format!(
            "Invalid date format: {input}. Please use YYYY-MM-DD format (e.g., 2024-03-21)"
        ));
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|e| format!("Invalid date {input}: {e}"))
}
