//! Output file handling
//!
//! Exports are stored as received: the body of the download call is written
//! byte for byte to `{output_dir}/{source}_{date1}_to_{date2}.csv`. There is
//! no temp-file swap, so an interrupted write leaves a partial file behind.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod path;

pub use path::OutputPathBuilder;

const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Output errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// Output directory could not be created
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDirectory {
        /// Directory that was being created
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// File could not be written
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// File that was being written
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Create `dir` and its parents; succeeds if it already exists
pub fn ensure_directory(dir: &Path) -> OutputResult<()> {
    std::fs::create_dir_all(dir).map_err(|source| OutputError::CreateDirectory {
        path: dir.to_path_buf(),
        source,
    })
}

/// Write `content` to `path`, replacing any existing file
pub fn write_file(path: &Path, content: &[u8]) -> OutputResult<()> {
    let to_write_error = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(to_write_error)?;
    let mut writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
    writer.write_all(content).map_err(to_write_error)?;
    writer.flush().map_err(to_write_error)?;

    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
