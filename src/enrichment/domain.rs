//! Internal domain models for lead lookup and enrichment.
//!
//! These types are OUR types - they don't change when a people-search source
//! changes its response format. Everything a provider returns gets converted
//! into these types by that provider's adapter.

use std::fmt;
use std::time::Duration;

/// What we ask a lookup provider for, built from one lead record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeadQuery {
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub state: String,
    /// Street address used to confirm a candidate, not sent with the search
    pub address: String,
}

impl LeadQuery {
    /// `"City, State"`, the location line a people-search form expects.
    pub fn location(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }

    /// `"First Last"` for log lines and CLI output.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Opaque handle a provider hands out for fetching a candidate's detail.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DetailRef(pub String);

impl DetailRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DetailRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One search result - possibly not the person we asked about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Name as the source displays it (order and middle names vary)
    pub display_name: String,
    pub detail_ref: DetailRef,
    /// Summary lists shown on the results page; may be empty
    pub addresses: Vec<String>,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
}

impl Candidate {
    /// A candidate with only a name and a detail handle.
    pub fn new(display_name: impl Into<String>, detail_ref: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            detail_ref: DetailRef::new(detail_ref),
            addresses: Vec::new(),
            phones: Vec::new(),
            emails: Vec::new(),
        }
    }
}

/// A candidate's expanded detail: current and historical addresses, each with
/// the phones and emails the source lists under it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidateDetail {
    pub listings: Vec<AddressListing>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddressListing {
    pub address: String,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
}

impl CandidateDetail {
    /// Listing addresses, in listing order.
    pub fn addresses(&self) -> Vec<&str> {
        self.listings.iter().map(|l| l.address.as_str()).collect()
    }

    /// Every email listed for the candidate, flattened in listing order.
    pub fn emails(&self) -> Vec<&str> {
        self.listings
            .iter()
            .flat_map(|l| l.emails.iter().map(String::as_str))
            .collect()
    }
}

/// Contact details chosen for a matched lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub phone: String,
    pub email: Option<String>,
}

/// Exactly one of these is produced per lead record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichmentOutcome {
    Matched(Contact),
    NotFound,
}

impl EnrichmentOutcome {
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    pub fn contact(&self) -> Option<&Contact> {
        match self {
            Self::Matched(contact) => Some(contact),
            Self::NotFound => None,
        }
    }
}

/// Errors a lookup provider or detail fetcher can report.
///
/// None of these are fatal to a batch: the orchestrator turns them into a
/// skipped candidate or a `NotFound` record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("API request failed: {0}")]
    Api(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("Unknown detail reference: {0}")]
    UnknownReference(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(address: &str, emails: &[&str]) -> AddressListing {
        AddressListing {
            address: address.to_string(),
            phones: vec![],
            emails: emails.iter().map(|e| e.to_string()).collect(),
        }
    }

    #[test]
    fn test_location_line() {
        let query = LeadQuery {
            city: "Austin".to_string(),
            state: "TX".to_string(),
            ..Default::default()
        };
        assert_eq!(query.location(), "Austin, TX");
    }

    #[test]
    fn test_detail_emails_flatten_in_listing_order() {
        let detail = CandidateDetail {
            listings: vec![
                listing("1 Main St", &["a@yahoo.com"]),
                listing("2 Oak Ave", &[]),
                listing("3 Elm Rd", &["b@gmail.com", "c@aol.com"]),
            ],
        };

        assert_eq!(detail.addresses(), vec!["1 Main St", "2 Oak Ave", "3 Elm Rd"]);
        assert_eq!(detail.emails(), vec!["a@yahoo.com", "b@gmail.com", "c@aol.com"]);
    }

    #[test]
    fn test_outcome_contact() {
        let matched = EnrichmentOutcome::Matched(Contact {
            phone: "555-0002".to_string(),
            email: None,
        });
        assert!(matched.is_matched());
        assert_eq!(matched.contact().map(|c| c.phone.as_str()), Some("555-0002"));
        assert!(EnrichmentOutcome::NotFound.contact().is_none());
    }
}
