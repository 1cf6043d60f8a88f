//! Output path generation
//!
//! One file per run, named after the source and the date range:
//!
//! ```rust
//! use metrika_logs_downloader::output::OutputPathBuilder;
//! use metrika_logs_downloader::{DateRange, Source};
//! use std::path::PathBuf;
//!
//! let range = DateRange::parse("2024-03-01", "2024-03-02").unwrap();
//! let path = OutputPathBuilder::new(PathBuf::from("data"), Source::Visits, range).build();
//! assert_eq!(path, PathBuf::from("data/visits_2024-03-01_to_2024-03-02.csv"));
//! ```

use std::path::PathBuf;

use super::OutputResult;
use crate::{DateRange, Source};

/// Path builder for exported log files
#[derive(Debug, Clone)]
pub struct OutputPathBuilder {
    root_dir: PathBuf,
    source: Source,
    date_range: DateRange,
}

impl OutputPathBuilder {
    /// Create a new path builder
    ///
    /// # Arguments
    ///
    /// * `root_dir` - Output directory, any nesting depth (e.g., "data" or "/var/exports/metrika")
    /// * `source` - Source kind of the export
    /// * `date_range` - Dates covered by the export
    pub fn new(root_dir: PathBuf, source: Source, date_range: DateRange) -> Self {
        Self {
            root_dir,
            source,
            date_range,
        }
    }

    /// `{source}_{date1}_to_{date2}.csv`
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}_to_{}.csv",
            self.source,
            self.date_range.date1(),
            self.date_range.date2()
        )
    }

    /// Build the complete file path
    pub fn build(&self) -> PathBuf {
        self.root_dir.join(self.file_name())
    }

    /// Ensure the output directory exists
    pub fn ensure_directories(&self) -> OutputResult<()> {
        super::ensure_directory(&self.root_dir)
    }
}
