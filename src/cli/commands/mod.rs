//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `enrich`: Batch enrichment of a lead list, and single-lead lookup
//! - `config`: Show or initialise the configuration file

mod config;
mod enrich;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::{Builder, Runtime};

use crate::config::Config;

pub use config::cmd_config;
pub use enrich::{cmd_enrich, cmd_lookup};

/// Skiptrace CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Show per-candidate decisions
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: OS config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Enrich a CSV lead list with phone numbers and emails
    Enrich {
        /// Input CSV with firstName, lastName, City, State, Address columns
        input: PathBuf,
        /// Output CSV (default: <input>_enriched.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        source: SourceArgs,
        /// Don't show the progress counter
        #[arg(short, long)]
        quiet: bool,
    },
    /// Look up a single lead and show the decision
    Lookup {
        #[arg(long)]
        first: String,
        #[arg(long)]
        last: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        state: String,
        /// Street address to confirm the candidate against
        #[arg(long)]
        address: String,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Show the effective configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Where lookups go
#[derive(Args, Clone, Default)]
pub struct SourceArgs {
    /// Answer lookups from a JSON fixture instead of the web service
    /// (takes precedence over any base URL)
    #[arg(long)]
    pub fixture: Option<PathBuf>,
    /// People-search service URL (or set SKIPTRACE_BASE_URL env var)
    #[arg(long, env = "SKIPTRACE_BASE_URL")]
    pub base_url: Option<String>,
    /// API key (or set SKIPTRACE_API_KEY env var)
    #[arg(long, env = "SKIPTRACE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl SourceArgs {
    /// Apply command-line overrides on top of file settings.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(url) = &self.base_url {
            config.lookup.base_url = Some(url.clone());
        }
        if let Some(key) = &self.api_key {
            config.lookup.api_key = Some(key.clone());
        }
        if let Some(timeout) = self.timeout {
            config.lookup.timeout_secs = timeout;
        }
    }
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli)?;

    match &cli.command {
        Commands::Enrich {
            input,
            output,
            source,
            quiet,
        } => cmd_enrich(&runtime()?, config, input, output.as_deref(), source, *quiet),
        Commands::Lookup {
            first,
            last,
            city,
            state,
            address,
            source,
        } => {
            let query = crate::enrichment::LeadQuery {
                first_name: first.clone(),
                last_name: last.clone(),
                city: city.clone(),
                state: state.clone(),
                address: address.clone(),
            };
            cmd_lookup(&runtime()?, config, &query, source)
        }
        Commands::Config { init } => cmd_config(&config, cli.config.as_deref(), *init),
    }
}

/// An explicit `--config` must parse; the default location falls back to defaults.
///
/// `config` may name a file that doesn't exist yet, since `--init` creates it.
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    match &cli.config {
        Some(path) if !path.exists() && matches!(cli.command, Commands::Config { .. }) => {
            Ok(Config::default())
        }
        Some(path) => Ok(crate::config::load_from(path)?),
        None => Ok(crate::config::load()),
    }
}

/// Leads are processed one at a time, so a single-threaded runtime is enough.
fn runtime() -> anyhow::Result<Runtime> {
    Ok(Builder::new_current_thread().enable_all().build()?)
}
