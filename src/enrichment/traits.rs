//! Trait definitions for the people-search collaborators.
//!
//! The orchestrator only knows these two traits. Production code plugs in the
//! HTTP client or the JSON fixture provider; tests substitute the scripted
//! mocks below, so matching and selection are exercised without a network.
//!
//! # Example
//!
//! ```ignore
//! use skiptrace::enrichment::traits::{LookupProvider, DetailFetcher};
//!
//! async fn first_detail<P: LookupProvider, D: DetailFetcher>(
//!     provider: &P,
//!     fetcher: &D,
//!     query: &LeadQuery,
//! ) -> Result<Option<CandidateDetail>, LookupError> {
//!     match provider.search(query).await?.first() {
//!         Some(candidate) => Ok(Some(fetcher.fetch_detail(&candidate.detail_ref).await?)),
//!         None => Ok(None),
//!     }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use super::domain::{Candidate, CandidateDetail, DetailRef, LeadQuery, LookupError};

/// Runs a name/location search and returns candidates in source order.
#[async_trait]
pub trait LookupProvider: Send + Sync {
    async fn search(&self, query: &LeadQuery) -> Result<Vec<Candidate>, LookupError>;
}

/// Expands a candidate handle into its address/phone/email listings.
#[async_trait]
pub trait DetailFetcher: Send + Sync {
    async fn fetch_detail(&self, detail_ref: &DetailRef) -> Result<CandidateDetail, LookupError>;
}

// One session object usually plays both roles; sharing it through an Arc lets
// the service hold it twice.

#[async_trait]
impl<T: LookupProvider + ?Sized> LookupProvider for Arc<T> {
    async fn search(&self, query: &LeadQuery) -> Result<Vec<Candidate>, LookupError> {
        (**self).search(query).await
    }
}

#[async_trait]
impl<T: DetailFetcher + ?Sized> DetailFetcher for Arc<T> {
    async fn fetch_detail(&self, detail_ref: &DetailRef) -> Result<CandidateDetail, LookupError> {
        (**self).fetch_detail(detail_ref).await
    }
}
