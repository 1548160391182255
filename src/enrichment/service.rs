//! Enrichment service - orchestrates lookup, disambiguation and contact selection
//!
//! For every lead:
//! 1. Search the lookup provider by name and location
//! 2. Walk candidates in provider order, skipping names that don't match
//! 3. Fetch candidate detail and confirm the street address
//! 4. Select the phone and preferred email for the confirmed address
//!
//! The first candidate that yields a phone wins; there is no scoring across
//! candidates. Lookup and detail failures are logged and absorbed here - they
//! never abort the batch.

use std::future::Future;
use std::time::Duration;

use crate::dataset::LeadRecord;
use crate::enrichment::{
    contact::{ContactSelector, EmailPreference, PhonePolicy},
    domain::{EnrichmentOutcome, LeadQuery, LookupError},
    matching::{NameCase, NameMatcher, match_address},
    progress::ProgressSink,
    traits::{DetailFetcher, LookupProvider},
};

/// Configuration for the enrichment service
#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    /// Upper bound for any single search or detail fetch
    pub call_timeout: Duration,
    /// Fixed pause between records (zero disables)
    pub record_delay: Duration,
    pub name_case: NameCase,
    pub phone_policy: PhonePolicy,
    pub email_preference: EmailPreference,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(30),
            record_delay: Duration::ZERO,
            name_case: NameCase::default(),
            phone_policy: PhonePolicy::default(),
            email_preference: EmailPreference::default(),
        }
    }
}

/// What happened while enriching one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordReport {
    pub outcome: EnrichmentOutcome,
    /// The search itself failed; no candidates were inspected
    pub lookup_failed: bool,
    /// Candidates skipped because their detail could not be fetched
    pub candidate_failures: usize,
    pub candidates_seen: usize,
}

impl RecordReport {
    fn not_found() -> Self {
        Self {
            outcome: EnrichmentOutcome::NotFound,
            lookup_failed: false,
            candidate_failures: 0,
            candidates_seen: 0,
        }
    }
}

/// Totals for a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub matched: usize,
    pub not_found: usize,
    pub lookup_failures: usize,
    pub candidate_failures: usize,
}

impl BatchSummary {
    fn tally(&mut self, report: &RecordReport) {
        match report.outcome {
            EnrichmentOutcome::Matched(_) => self.matched += 1,
            EnrichmentOutcome::NotFound => self.not_found += 1,
        }
        if report.lookup_failed {
            self.lookup_failures += 1;
        }
        self.candidate_failures += report.candidate_failures;
    }
}

/// Service for enriching lead records from a people-search source
pub struct EnrichmentService<P, D> {
    config: EnrichmentConfig,
    provider: P,
    fetcher: D,
    names: NameMatcher,
    selector: ContactSelector,
}

impl<P: LookupProvider, D: DetailFetcher> EnrichmentService<P, D> {
    pub fn new(provider: P, fetcher: D, config: EnrichmentConfig) -> Self {
        Self {
            names: NameMatcher::new(config.name_case),
            selector: ContactSelector::new(config.phone_policy, config.email_preference.clone()),
            provider,
            fetcher,
            config,
        }
    }

    /// Enrich a single lead.
    pub async fn enrich(&self, query: &LeadQuery) -> EnrichmentOutcome {
        self.run(None, query).await.outcome
    }

    /// Enrich the lead at `index` in a batch, reporting what went wrong along the way.
    pub async fn enrich_record(&self, index: usize, query: &LeadQuery) -> RecordReport {
        self.run(Some(index), query).await
    }

    /// Enrich every record in input order, one at a time.
    ///
    /// Each record's outcome is applied to it in place and the sink is told
    /// after every record.
    pub async fn enrich_batch(
        &self,
        records: &mut [LeadRecord],
        progress: &mut dyn ProgressSink,
    ) -> BatchSummary {
        let total = records.len();
        let mut summary = BatchSummary {
            total,
            ..Default::default()
        };

        for (index, record) in records.iter_mut().enumerate() {
            let query = record.query();
            let report = self.enrich_record(index, &query).await;
            summary.tally(&report);
            record.apply(report.outcome);

            progress.record_completed(index + 1, total);

            if !self.config.record_delay.is_zero() && index + 1 < total {
                tokio::time::sleep(self.config.record_delay).await;
            }
        }

        tracing::info!(
            total = summary.total,
            matched = summary.matched,
            not_found = summary.not_found,
            lookup_failures = summary.lookup_failures,
            "Batch enrichment finished"
        );
        summary
    }

    async fn run(&self, index: Option<usize>, query: &LeadQuery) -> RecordReport {
        let mut report = RecordReport::not_found();
        let name = query.full_name();

        let candidates = match self.bounded(self.provider.search(query)).await {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!(record = ?index, name = %name, "Lookup failed: {}", e);
                report.lookup_failed = true;
                return report;
            }
        };
        report.candidates_seen = candidates.len();

        for candidate in &candidates {
            if !self
                .names
                .matches(&query.first_name, &query.last_name, &candidate.display_name)
            {
                tracing::debug!(record = ?index, "Skipping {:?}: name mismatch", candidate.display_name);
                continue;
            }

            let detail = match self.bounded(self.fetcher.fetch_detail(&candidate.detail_ref)).await {
                Ok(detail) => detail,
                Err(e) => {
                    tracing::warn!(
                        record = ?index,
                        name = %name,
                        candidate = %candidate.detail_ref,
                        "Detail fetch failed: {}",
                        e
                    );
                    report.candidate_failures += 1;
                    continue;
                }
            };

            let Some(position) = match_address(&query.address, &detail.addresses()) else {
                tracing::debug!(record = ?index, candidate = %candidate.detail_ref, "No address match");
                continue;
            };

            let listing = &detail.listings[position];
            match self.selector.select(&listing.phones, &detail.emails()) {
                Some(contact) => {
                    tracing::debug!(record = ?index, candidate = %candidate.detail_ref, "Matched");
                    report.outcome = EnrichmentOutcome::Matched(contact);
                    break;
                }
                None => {
                    tracing::debug!(
                        record = ?index,
                        candidate = %candidate.detail_ref,
                        "Address matched but only {} phone(s) listed",
                        listing.phones.len()
                    );
                }
            }
        }

        if !report.outcome.is_matched() {
            tracing::debug!(record = ?index, name = %name, "No match among {} candidate(s)", report.candidates_seen);
        }
        report
    }

    /// Apply the per-call timeout to a provider call.
    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, LookupError>>,
    ) -> Result<T, LookupError> {
        tokio::time::timeout(self.config.call_timeout, call)
            .await
            .unwrap_or(Err(LookupError::Timeout(self.config.call_timeout)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{self, LeadDataset};
    use crate::enrichment::domain::{Candidate, Contact};
    use crate::enrichment::progress::NoProgress;
    use crate::enrichment::traits::mocks::{MockDetails, MockLookup};
    use crate::test_utils::{detail, lead, listing, query};

    fn service(lookup: MockLookup, details: MockDetails) -> EnrichmentService<MockLookup, MockDetails> {
        EnrichmentService::new(lookup, details, EnrichmentConfig::default())
    }

    #[test]
    fn test_default_config() {
        let config = EnrichmentConfig::default();
        assert_eq!(config.call_timeout, Duration::from_secs(30));
        assert!(config.record_delay.is_zero());
        assert_eq!(config.name_case, NameCase::Exact);
        assert_eq!(config.phone_policy.position(), 2);
        assert_eq!(config.email_preference.domains(), ["gmail.com", "yahoo.com"]);
    }

    #[tokio::test]
    async fn test_skips_address_mismatch_then_matches_second_candidate() {
        let lookup = MockLookup::new().with_candidates(
            "Jane Doe",
            vec![Candidate::new("Jane Doe", "a"), Candidate::new("Doe M Jane", "b")],
        );
        let details = MockDetails::new()
            .with_detail("a", detail(vec![listing("99 Elsewhere Rd", &["x1", "x2"], &[])]))
            .with_detail(
                "b",
                detail(vec![listing("12 Oak St", &["p1", "p2"], &["jd@hotmail.com"])]),
            );
        let svc = service(lookup, details);

        let outcome = svc.enrich(&query("Jane", "Doe", "12 Oak St")).await;

        assert_eq!(
            outcome,
            EnrichmentOutcome::Matched(Contact {
                phone: "p2".to_string(),
                email: None,
            })
        );
    }

    #[tokio::test]
    async fn test_first_full_match_wins() {
        let lookup = MockLookup::new().with_candidates(
            "Jane Doe",
            vec![Candidate::new("Jane Doe", "a"), Candidate::new("Jane Doe", "b")],
        );
        let details = MockDetails::new()
            .with_detail("a", detail(vec![listing("12 Oak St", &["a1", "a2"], &[])]))
            .with_detail("b", detail(vec![listing("12 Oak St", &["b1", "b2"], &["b@gmail.com"])]));
        let svc = service(lookup, details);

        let outcome = svc.enrich(&query("Jane", "Doe", "12 Oak St")).await;

        assert_eq!(outcome.contact().map(|c| c.phone.as_str()), Some("a2"));
        assert_eq!(svc.fetcher.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_name_mismatch_never_fetches_detail() {
        let lookup = MockLookup::new().with_candidates(
            "Jane Doe",
            vec![Candidate::new("John Doe", "a"), Candidate::new("Jane", "b")],
        );
        let svc = service(lookup, MockDetails::new());

        let report = svc.enrich_record(0, &query("Jane", "Doe", "12 Oak St")).await;

        assert_eq!(report.outcome, EnrichmentOutcome::NotFound);
        assert_eq!(report.candidates_seen, 2);
        assert_eq!(svc.fetcher.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_detail_failure_moves_to_next_candidate() {
        let lookup = MockLookup::new().with_candidates(
            "Jane Doe",
            vec![Candidate::new("Jane Doe", "broken"), Candidate::new("Jane Doe", "ok")],
        );
        let details = MockDetails::new()
            .with_error("broken", LookupError::Network("connection reset".into()))
            .with_detail("ok", detail(vec![listing("12 Oak St", &["p1", "p2"], &["j@yahoo.com"])]));
        let svc = service(lookup, details);

        let report = svc.enrich_record(3, &query("Jane", "Doe", "12 Oak St")).await;

        assert_eq!(report.candidate_failures, 1);
        assert!(!report.lookup_failed);
        assert_eq!(
            report.outcome.contact().and_then(|c| c.email.as_deref()),
            Some("j@yahoo.com")
        );
    }

    #[tokio::test]
    async fn test_single_phone_at_matched_address_keeps_looking() {
        let lookup = MockLookup::new().with_candidates(
            "Jane Doe",
            vec![Candidate::new("Jane Doe", "a"), Candidate::new("Jane Doe", "b")],
        );
        let details = MockDetails::new()
            .with_detail("a", detail(vec![listing("12 Oak St", &["only"], &["a@gmail.com"])]))
            .with_detail("b", detail(vec![listing("12 Oak St", &["b1", "b2"], &[])]));
        let svc = service(lookup, details);

        let outcome = svc.enrich(&query("Jane", "Doe", "12 Oak St")).await;

        assert_eq!(outcome.contact().map(|c| c.phone.as_str()), Some("b2"));
    }

    #[tokio::test]
    async fn test_blank_phone_at_position_keeps_looking() {
        let lookup = MockLookup::new().with_candidates(
            "Jane Doe",
            vec![Candidate::new("Jane Doe", "a"), Candidate::new("Jane Doe", "b")],
        );
        let details = MockDetails::new()
            .with_detail("a", detail(vec![listing("12 Oak St", &["x1", "  "], &[])]))
            .with_detail("b", detail(vec![listing("12 Oak St", &["b1", "b2"], &[])]));
        let svc = service(lookup, details);

        let outcome = svc.enrich(&query("Jane", "Doe", "12 Oak St")).await;

        assert_eq!(outcome.contact().map(|c| c.phone.as_str()), Some("b2"));
        assert_eq!(svc.fetcher.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_phones_come_from_matched_address_emails_from_candidate() {
        let lookup =
            MockLookup::new().with_candidates("Jane Doe", vec![Candidate::new("Jane Doe", "a")]);
        let details = MockDetails::new().with_detail(
            "a",
            detail(vec![
                listing("1 Old Rd", &["old1", "old2"], &["jd@gmail.com"]),
                listing("12 Oak St", &["new1", "new2"], &["jd@yahoo.com"]),
            ]),
        );
        let svc = service(lookup, details);

        let outcome = svc.enrich(&query("Jane", "Doe", "12 Oak St")).await;

        assert_eq!(
            outcome,
            EnrichmentOutcome::Matched(Contact {
                phone: "new2".to_string(),
                email: Some("jd@gmail.com".to_string()),
            })
        );
    }

    #[tokio::test]
    async fn test_hanging_lookup_times_out() {
        let lookup = MockLookup::new().hanging("Jane Doe");
        let config = EnrichmentConfig {
            call_timeout: Duration::from_millis(20),
            ..Default::default()
        };
        let svc = EnrichmentService::new(lookup, MockDetails::new(), config);

        let report = svc.enrich_record(0, &query("Jane", "Doe", "12 Oak St")).await;

        assert!(report.lookup_failed);
        assert_eq!(report.outcome, EnrichmentOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_failed_lookup_does_not_stop_batch() {
        let lookup = MockLookup::new()
            .with_error("Ann Lee", LookupError::Timeout(Duration::from_secs(30)))
            .with_candidates("Bo Chan", vec![Candidate::new("Chan Bo", "bo")]);
        let details = MockDetails::new()
            .with_detail("bo", detail(vec![listing("7 Bay Rd", &["b1", "b2"], &[])]));
        let svc = service(lookup, details);

        let mut records = vec![
            lead("Ann", "Lee", "1 Main St"),
            lead("Bo", "Chan", "7 Bay Rd"),
        ];
        let mut ticks = Vec::new();
        let mut sink = |done: usize, total: usize| ticks.push((done, total));
        let summary = svc.enrich_batch(&mut records, &mut sink).await;

        assert_eq!(ticks, vec![(1, 2), (2, 2)]);
        assert_eq!(
            summary,
            BatchSummary {
                total: 2,
                matched: 1,
                not_found: 1,
                lookup_failures: 1,
                candidate_failures: 0,
            }
        );
        assert_eq!(svc.provider.call_log(), vec!["Ann Lee", "Bo Chan"]);
        assert!(!records[0].is_enriched());
        assert_eq!(records[0].get("phone"), None);
        assert_eq!(records[1].get("phone"), Some("b2"));
    }

    #[tokio::test]
    async fn test_matched_without_email_written_with_empty_column() {
        let lookup = MockLookup::new().with_candidates(
            "Jane Doe",
            vec![Candidate::new("Jane Doe", "a"), Candidate::new("Jane Doe", "b")],
        );
        let details = MockDetails::new()
            .with_detail("a", detail(vec![listing("5 Far Ln", &["q1", "q2"], &[])]))
            .with_detail("b", detail(vec![listing("12 Oak St", &["p1", "p2"], &["jd@aol.com"])]));
        let svc = service(lookup, details);

        let mut data = LeadDataset::from_records(vec![
            lead("Jane", "Doe", "12 Oak St"),
            lead("Nobody", "Here", "0 Void"),
        ]);
        svc.enrich_batch(&mut data.records, &mut NoProgress).await;

        let mut out = Vec::new();
        let written = dataset::write_enriched_to(&mut out, &data).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(written, 1);
        assert_eq!(
            text,
            "firstName,lastName,City,State,Address,phone,email\n\
             Jane,Doe,Austin,TX,12 Oak St,p2,\n"
        );
    }
}
