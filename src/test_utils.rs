//! Test utilities and fixtures for skiptrace tests.
//!
//! Builders for leads, queries and candidate detail, so tests can describe a
//! lookup scenario in a few lines.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{detail, listing, query};
//!
//! let detail = detail(vec![listing("12 Oak St", &["p1", "p2"], &["a@gmail.com"])]);
//! let query = query("Jane", "Doe", "12 Oak St");
//! ```

use crate::dataset::LeadRecord;
use crate::enrichment::{AddressListing, CandidateDetail, LeadQuery};

/// A lead in Austin, TX with the given name and street address.
pub fn lead(first: &str, last: &str, address: &str) -> LeadRecord {
    LeadRecord::from_fields([
        ("firstName", first),
        ("lastName", last),
        ("City", "Austin"),
        ("State", "TX"),
        ("Address", address),
    ])
}

/// The query [`lead`] would produce.
pub fn query(first: &str, last: &str, address: &str) -> LeadQuery {
    LeadQuery {
        first_name: first.to_string(),
        last_name: last.to_string(),
        city: "Austin".to_string(),
        state: "TX".to_string(),
        address: address.to_string(),
    }
}

pub fn listing(address: &str, phones: &[&str], emails: &[&str]) -> AddressListing {
    AddressListing {
        address: address.to_string(),
        phones: phones.iter().map(|p| p.to_string()).collect(),
        emails: emails.iter().map(|e| e.to_string()).collect(),
    }
}

pub fn detail(listings: Vec<AddressListing>) -> CandidateDetail {
    CandidateDetail { listings }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_matches_query_builder() {
        assert_eq!(lead("Jane", "Doe", "12 Oak St").query(), query("Jane", "Doe", "12 Oak St"));
    }

    #[test]
    fn test_listing_builder() {
        let l = listing("1 Main St", &["p1"], &[]);
        assert_eq!(l.address, "1 Main St");
        assert_eq!(l.phones, vec!["p1"]);
        assert!(l.emails.is_empty());
    }
}
