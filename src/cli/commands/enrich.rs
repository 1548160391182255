//! Lead enrichment commands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::runtime::Runtime;

use super::SourceArgs;
use crate::config::Config;
use crate::dataset::{self, LeadDataset};
use crate::enrichment::{
    BatchSummary, ConsoleProgress, DetailFetcher, EnrichmentConfig, EnrichmentOutcome,
    EnrichmentService, FixtureProvider, LeadQuery, LookupProvider, NoProgress,
    PeopleSearchClient, ProgressSink,
};
use crate::error::{Result, ResultExt};

type SharedService = EnrichmentService<Arc<dyn LookupProvider>, Arc<dyn DetailFetcher>>;

/// The lookup collaborators for a run, shared by search and detail fetches.
struct Source {
    provider: Arc<dyn LookupProvider>,
    fetcher: Arc<dyn DetailFetcher>,
    label: String,
}

impl Source {
    fn build(args: &SourceArgs, config: &Config) -> anyhow::Result<Self> {
        if let Some(path) = &args.fixture {
            let fixture = Arc::new(FixtureProvider::load(path).with_context("loading lookup fixture")?);
            let provider: Arc<dyn LookupProvider> = fixture.clone();
            let fetcher: Arc<dyn DetailFetcher> = fixture;
            return Ok(Self {
                provider,
                fetcher,
                label: format!("fixture {}", path.display()),
            });
        }

        let Some(base_url) = config.lookup.base_url.as_deref() else {
            anyhow::bail!(
                "No lookup source configured. Use --base-url (or SKIPTRACE_BASE_URL), \
                 set lookup.base_url in the config file, or pass --fixture."
            );
        };
        let timeout = std::time::Duration::from_secs(config.lookup.timeout_secs);
        let client = Arc::new(
            PeopleSearchClient::new(base_url, config.lookup.api_key.clone(), timeout)
                .with_context("creating people-search client")?,
        );
        let provider: Arc<dyn LookupProvider> = client.clone();
        let fetcher: Arc<dyn DetailFetcher> = client;
        Ok(Self {
            provider,
            fetcher,
            label: base_url.to_string(),
        })
    }

    fn into_service(self, config: EnrichmentConfig) -> SharedService {
        EnrichmentService::new(self.provider, self.fetcher, config)
    }
}

/// Batch enrich a CSV lead list
pub fn cmd_enrich(
    rt: &Runtime,
    mut config: Config,
    input: &Path,
    output: Option<&Path>,
    source_args: &SourceArgs,
    quiet: bool,
) -> anyhow::Result<()> {
    source_args.apply_to(&mut config);
    let settings = config.enrichment_config()?;

    // Fatal before any lookup happens
    let mut data = load_leads(input)?;

    let source = Source::build(source_args, &config)?;
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input));

    println!("Enriching {} lead(s) via {}...\n", data.len(), source.label);

    let service = source.into_service(settings);
    let mut console = ConsoleProgress::stderr();
    let mut silent = NoProgress;
    let progress: &mut dyn ProgressSink = if quiet { &mut silent } else { &mut console };

    let summary = rt.block_on(service.enrich_batch(&mut data.records, progress));

    let written = dataset::write_enriched(&output, &data)
        .with_context(format!("writing {}", output.display()))?;

    println!();
    println!("{}", summary_line(&summary));
    println!("Wrote {} row(s) to {}", written, output.display());
    Ok(())
}

/// Look up one lead and print what was decided
pub fn cmd_lookup(
    rt: &Runtime,
    mut config: Config,
    query: &LeadQuery,
    source_args: &SourceArgs,
) -> anyhow::Result<()> {
    source_args.apply_to(&mut config);
    let settings = config.enrichment_config()?;
    let service = Source::build(source_args, &config)?.into_service(settings);

    println!("Looking up: {} ({}) at {}", query.full_name(), query.location(), query.address);
    println!();

    let report = rt.block_on(service.enrich_record(0, query));

    match &report.outcome {
        EnrichmentOutcome::Matched(contact) => {
            println!("✓ Match found ({} candidate(s) returned)", report.candidates_seen);
            println!();
            println!("  Phone: {}", contact.phone);
            println!("  Email: {}", contact.email.as_deref().unwrap_or("(none)"));
        }
        EnrichmentOutcome::NotFound if report.lookup_failed => {
            println!("✗ Lookup failed (see log above)");
        }
        EnrichmentOutcome::NotFound => {
            println!("✗ No match among {} candidate(s)", report.candidates_seen);
        }
    }
    if report.candidate_failures > 0 {
        println!("  {} candidate(s) skipped after detail errors", report.candidate_failures);
    }
    Ok(())
}

fn load_leads(input: &Path) -> Result<LeadDataset> {
    dataset::read_leads(input).with_context(format!("reading lead list {}", input.display()))
}

/// `leads.csv` → `leads_enriched.csv` in the same directory
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("leads");
    input.with_file_name(format!("{stem}_enriched.csv"))
}

fn summary_line(summary: &BatchSummary) -> String {
    let mut line = format!(
        "Done! {} matched, {} not found",
        summary.matched, summary.not_found
    );
    if summary.lookup_failures > 0 || summary.candidate_failures > 0 {
        line.push_str(&format!(
            " ({} lookup failures, {} candidate failures)",
            summary.lookup_failures, summary.candidate_failures
        ));
    }
    line
}
