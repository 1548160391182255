//! People-search API Data Transfer Objects
//!
//! These types match EXACTLY what the search service returns.
//! DO NOT use these types outside the http module - convert to domain types.
//!
//! Search response (`GET /search`):
//! ```json
//! {
//!   "status": "ok",
//!   "results": [{
//!     "id": "p-81723",
//!     "name": "Doe Jane",
//!     "addresses": ["12 Oak St"],
//!     "phones": ["(512) 555-0101"],
//!     "emails": []
//!   }]
//! }
//! ```
//!
//! Detail response (`GET /people/{id}`):
//! ```json
//! {
//!   "id": "p-81723",
//!   "name": "Jane M Doe",
//!   "listings": [{
//!     "address": "12 Oak St",
//!     "phones": ["(512) 555-0100", "(512) 555-0101"],
//!     "emails": ["jdoe@yahoo.com"]
//!   }]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Top-level search response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<PersonSummary>,
    /// Error info if status != "ok"
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub code: i32,
    pub message: String,
}

/// One row of the search results page
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PersonSummary {
    /// Handle for the detail endpoint
    pub id: String,
    /// Display name, in whatever order the service chose
    pub name: String,
    #[serde(default)]
    pub addresses: Vec<String>,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub emails: Vec<String>,
}

/// Person detail page
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PersonDetail {
    pub id: String,
    pub name: Option<String>,
    #[serde(default)]
    pub listings: Vec<Listing>,
}

/// An address with the numbers and emails listed under it
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Listing {
    pub address: String,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub emails: Vec<String>,
}

// ============================================================================
// CONTRACT TESTS
// These pin the response shapes we depend on.
// ============================================================================
