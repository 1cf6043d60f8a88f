//! CLI error types and conversions

use crate::downloader::DownloadError;
use crate::fetcher::FetcherError;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Download error
    #[error("{0}")]
    DownloadError(#[from] DownloadError),

    /// HTTP client could not be built
    #[error("fetcher error: {0}")]
    FetcherError(#[from] FetcherError),

    /// Invalid argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// True when the requested source kind has no implementation
    pub fn is_unsupported_source(&self) -> bool {
        matches!(
            self,
            CliError::DownloadError(DownloadError::UnsupportedSource(_))
        )
    }
}
