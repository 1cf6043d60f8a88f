//! Download configuration constants

use std::time::Duration;

/// Default polling budget.
/// Log requests for a day or two of visits usually take a few minutes;
/// large counters can take tens of minutes.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Fixed delay between status checks
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Bodies shorter than this are treated as empty exports.
/// A header-only TSV for the visits field list is well under 1 KiB.
pub const MIN_CONTENT_BYTES: usize = 1024;

/// Only part 0 is downloaded; multi-part results are not paginated
pub const DOWNLOAD_PART: u32 = 0;

/// Polling parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Wall-clock budget for the whole polling loop
    pub timeout: Duration,
    /// Sleep between consecutive status checks
    pub interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_POLL_TIMEOUT,
            interval: POLL_INTERVAL,
        }
    }
}

impl PollConfig {
    /// Budget expressed in minutes, the unit used on the command line
    pub fn from_minutes(minutes: u64) -> Self {
        Self::default().with_timeout(Duration::from_secs(minutes.saturating_mul(60)))
    }

    /// Override the polling budget
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the interval between status checks
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}
