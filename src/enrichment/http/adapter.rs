//! Adapter layer: Convert people-search DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.

use super::dto;
use crate::enrichment::domain::{AddressListing, Candidate, CandidateDetail, DetailRef, LookupError};

/// Convert a search response into candidates, preserving result order.
pub fn to_candidates(response: dto::SearchResponse) -> Result<Vec<Candidate>, LookupError> {
    if response.status != "ok" {
        let message = response
            .error
            .map(|e| format!("{} (code {})", e.message, e.code))
            .unwrap_or_else(|| format!("status {}", response.status));
        return Err(LookupError::Api(message));
    }

    Ok(response
        .results
        .into_iter()
        .map(|person| Candidate {
            display_name: person.name,
            detail_ref: DetailRef(person.id),
            addresses: person.addresses,
            phones: clean_values(person.phones),
            emails: clean_values(person.emails),
        })
        .collect())
}

/// Convert a detail page into listings.
pub fn to_detail(detail: dto::PersonDetail) -> CandidateDetail {
    CandidateDetail {
        listings: detail
            .listings
            .into_iter()
            .map(|listing| AddressListing {
                address: listing.address,
                phones: clean_values(listing.phones),
                emails: clean_values(listing.emails),
            })
            .collect(),
    }
}

/// Trim values and drop blank ones; the source pads some entries with whitespace.
fn clean_values(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}
