//! Lead enrichment - finds a lead's phone number and email through a
//! people-search source.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Internal types for queries, candidates and outcomes
//! - **Provider seam** (`traits.rs`) - What the service needs from a lookup source
//! - **Providers** (`http/`, `fixture.rs`) - A JSON web service client and an offline fixture
//! - **Decision logic** (`matching.rs`, `contact.rs`) - Pure functions, no I/O
//! - **Service** (`service.rs`) - Walks candidates and applies the decision logic
//!
//! Providers can be swapped without touching the decision logic, and the
//! decision logic is testable without a network.
//!
//! # Usage
//!
//! ```ignore
//! use enrichment::{EnrichmentService, EnrichmentConfig, FixtureProvider};
//!
//! let source = Arc::new(FixtureProvider::load(Path::new("fixture.json"))?);
//! let service = EnrichmentService::new(source.clone(), source, EnrichmentConfig::default());
//!
//! match service.enrich(&lead.query()).await {
//!     EnrichmentOutcome::Matched(contact) => println!("{}", contact.phone),
//!     EnrichmentOutcome::NotFound => println!("no match"),
//! }
//! ```

pub mod contact;
pub mod domain;
pub mod fixture;
pub mod http;
pub mod matching;
pub mod progress;
pub mod service;
pub mod traits;

pub use contact::{ContactSelector, EmailPreference, PhonePolicy};
pub use domain::{
    AddressListing, Candidate, CandidateDetail, Contact, DetailRef, EnrichmentOutcome, LeadQuery,
    LookupError,
};
pub use fixture::FixtureProvider;
pub use http::PeopleSearchClient;
pub use matching::{NameCase, NameMatcher, match_address};
pub use progress::{ConsoleProgress, NoProgress, ProgressSink};
pub use service::{BatchSummary, EnrichmentConfig, EnrichmentService, RecordReport};
pub use traits::{DetailFetcher, LookupProvider};
