//! People-search web service integration
//!
//! A JSON service with a name/location search and a per-person detail page.
//! Responses are decoded into DTOs and converted to domain types by the
//! adapter; nothing outside this module sees the wire format.

mod adapter;
mod client;
pub mod dto;

pub use client::PeopleSearchClient;
