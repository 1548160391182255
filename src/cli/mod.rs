//! Command-line interface for skiptrace.
//!
//! Provides batch enrichment of a lead list, single-lead lookups, and
//! configuration management.

mod commands;

pub use commands::{Cli, Commands, run_command};
