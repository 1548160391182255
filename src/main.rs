//! Skiptrace - enrich a CSV lead list with phone numbers and emails.
//!
//! Each lead is searched for by name and location, candidates are confirmed
//! by name and street address, and the first confirmed candidate's contact
//! details are written back next to the original columns.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod enrichment;
pub mod error;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Logs go to stderr so stdout stays clean for results
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(log_filter(args.verbose, std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .init();

    cli::run_command(&args)
}

/// `RUST_LOG` when set and valid, otherwise our own crate at info (debug with `--verbose`).
fn log_filter(verbose: bool, rust_log: Option<String>) -> EnvFilter {
    let default = if verbose {
        "skiptrace=debug"
    } else {
        "skiptrace=info"
    };
    rust_log
        .filter(|spec| !spec.trim().is_empty())
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}
