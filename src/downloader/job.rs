//! Log request structures and status tracking

use std::path::PathBuf;
use std::time::Duration;

use crate::{DateRange, Source};

/// A log request accepted by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    /// Id assigned by the server
    pub request_id: String,
    /// Counter the logs belong to
    pub counter_id: String,
    /// Requested date range
    pub date_range: DateRange,
    /// Requested source kind
    pub source: Source,
    /// Requested fields, in order
    pub fields: Vec<String>,
}

/// Status of a log request as reported by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    /// Not finished yet (`created`, `awaiting_retry`, ...); raw value kept for logs
    Pending(String),
    /// Data is prepared and can be downloaded
    Processed,
    /// Cancelled on the server
    Canceled,
    /// Processing failed on the server
    Failed,
}

impl JobStatus {
    /// Map a raw `log_request.status` value
    pub fn from_remote(status: &str) -> Self {
        match status {
            "processed" => JobStatus::Processed,
            "canceled" => JobStatus::Canceled,
            "failed" | "processing_failed" => JobStatus::Failed,
            other => JobStatus::Pending(other.to_string()),
        }
    }

    /// No further transition happens from a terminal status
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::Pending(_))
    }

    /// Terminal status other than `processed`
    pub fn is_failure(&self) -> bool {
        matches!(self, JobStatus::Canceled | JobStatus::Failed)
    }

    /// Status text for logs and metric labels
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Pending(raw) => raw.as_str(),
            JobStatus::Processed => "processed",
            JobStatus::Canceled => "canceled",
            JobStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a successful polling loop went
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOutcome {
    /// Status checks performed, including the one that saw `processed`
    pub attempts: u32,
    /// Time spent polling
    pub elapsed: Duration,
}

/// A saved export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    /// Written file
    pub path: PathBuf,
    /// Bytes written
    pub bytes: usize,
}
