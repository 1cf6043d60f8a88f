//! Main entry point for metrika-logs-downloader CLI

use clap::Parser;
use metrika_logs_downloader::cli::Cli;
use std::time::Instant;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber with optional JSON formatting
fn init_tracing() {
    // Check if JSON output is requested via environment variable
    let json_format = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("metrika_logs_downloader=info"));

    if json_format {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn main() {
    let started = Instant::now();
    init_tracing();
    metrika_logs_downloader::metrics::describe_metrics();

    // Usage errors go to stdout and exit with 1 like every other failure
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            println!("{}", e.render());
            std::process::exit(1);
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(0);
        }
    };

    match cli.execute() {
        Ok(saved) => {
            println!("Successfully saved to: {}", saved.path.display());
            println!("\nCompleted in {:.1} seconds", started.elapsed().as_secs_f64());
        }
        Err(e) => {
            error!("Command failed: {}", e);
            println!("\nERROR: {e}");
            if e.is_unsupported_source() {
                println!("Only 'visits' source is currently supported.");
            }
            std::process::exit(1);
        }
    }
}
