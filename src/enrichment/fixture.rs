//! Offline lookup provider backed by a JSON fixture file.
//!
//! Answers searches and detail fetches from recorded data, so a batch can be
//! run without touching the network and always gives the same output.
//!
//! ```json
//! {
//!   "searches": [{
//!     "query": {"first_name": "Jane", "last_name": "Doe", "city": "Austin", "state": "TX"},
//!     "candidates": [{"name": "Doe M Jane", "ref": "p-1"}]
//!   }, {
//!     "query": {"first_name": "Ann", "last_name": "Lee", "city": "Reno", "state": "NV"},
//!     "fail": "timeout"
//!   }],
//!   "details": {
//!     "p-1": [{"address": "12 Oak St", "phones": ["555-0100", "555-0101"], "emails": []}]
//!   }
//! }
//! ```
//!
//! Searches with no recorded entry return no candidates.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::domain::{AddressListing, Candidate, CandidateDetail, DetailRef, LeadQuery, LookupError};
use super::traits::{DetailFetcher, LookupProvider};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FixtureFile {
    #[serde(default)]
    pub searches: Vec<FixtureSearch>,
    #[serde(default)]
    pub details: BTreeMap<String, Vec<FixtureListing>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FixtureSearch {
    pub query: FixtureQuery,
    #[serde(default)]
    pub candidates: Vec<FixtureCandidate>,
    /// Simulate a failed search instead of returning candidates
    #[serde(default)]
    pub fail: Option<FixtureFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FixtureQuery {
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FixtureCandidate {
    pub name: String,
    #[serde(rename = "ref")]
    pub detail_ref: String,
    #[serde(default)]
    pub addresses: Vec<String>,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub emails: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FixtureListing {
    pub address: String,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub emails: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureFailure {
    Timeout,
    Network,
    RateLimited,
}

impl FixtureFailure {
    fn to_error(self) -> LookupError {
        match self {
            Self::Timeout => LookupError::Timeout(Duration::ZERO),
            Self::Network => LookupError::Network("simulated network failure".to_string()),
            Self::RateLimited => LookupError::RateLimited,
        }
    }
}

impl FixtureQuery {
    fn matches(&self, query: &LeadQuery) -> bool {
        self.first_name == query.first_name
            && self.last_name == query.last_name
            && self.city == query.city
            && self.state == query.state
    }
}

/// Lookup provider and detail fetcher answering from a [`FixtureFile`].
#[derive(Debug, Clone, Default)]
pub struct FixtureProvider {
    fixture: FixtureFile,
}

impl FixtureProvider {
    pub fn new(fixture: FixtureFile) -> Self {
        Self { fixture }
    }

    /// Load a fixture file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        let fixture = serde_json::from_str(&contents)
            .map_err(|e| Error::invalid_format(path, e.to_string()))?;
        tracing::info!("Loaded lookup fixture from {}", path.display());
        Ok(Self::new(fixture))
    }

    fn find_search(&self, query: &LeadQuery) -> Option<&FixtureSearch> {
        self.fixture.searches.iter().find(|s| s.query.matches(query))
    }
}

#[async_trait]
impl LookupProvider for FixtureProvider {
    async fn search(&self, query: &LeadQuery) -> std::result::Result<Vec<Candidate>, LookupError> {
        let Some(search) = self.find_search(query) else {
            return Ok(Vec::new());
        };
        if let Some(failure) = search.fail {
            return Err(failure.to_error());
        }

        Ok(search
            .candidates
            .iter()
            .map(|c| Candidate {
                display_name: c.name.clone(),
                detail_ref: DetailRef::new(c.detail_ref.clone()),
                addresses: c.addresses.clone(),
                phones: clean_values(&c.phones),
                emails: clean_values(&c.emails),
            })
            .collect())
    }
}

#[async_trait]
impl DetailFetcher for FixtureProvider {
    async fn fetch_detail(
        &self,
        detail_ref: &DetailRef,
    ) -> std::result::Result<CandidateDetail, LookupError> {
        let listings = self
            .fixture
            .details
            .get(detail_ref.as_str())
            .ok_or_else(|| LookupError::UnknownReference(detail_ref.to_string()))?;

        Ok(CandidateDetail {
            listings: listings
                .iter()
                .map(|l| AddressListing {
                    address: l.address.clone(),
                    phones: clean_values(&l.phones),
                    emails: clean_values(&l.emails),
                })
                .collect(),
        })
    }
}

/// Recorded values are trimmed and blank ones dropped, as the HTTP adapter does.
fn clean_values(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
