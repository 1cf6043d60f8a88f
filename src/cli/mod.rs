//! CLI command implementation

pub mod download;
pub mod error;

pub use download::Cli;
pub use error::CliError;
