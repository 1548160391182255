//! Lead list I/O.
//!
//! A lead list is a CSV file whose header row names the fields. Records keep
//! every input column; enrichment adds `phone` and `email` to matched records
//! only, and only matched records are written back out.

mod reader;
mod writer;

use std::path::PathBuf;

use crate::enrichment::{EnrichmentOutcome, LeadQuery};

pub use reader::{read_leads, read_leads_from_str};
pub use writer::{output_headers, write_enriched, write_enriched_to};

pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const CITY: &str = "City";
pub const STATE: &str = "State";
pub const ADDRESS: &str = "Address";
pub const PHONE: &str = "phone";
pub const EMAIL: &str = "email";

/// Columns every input file must have.
pub const REQUIRED_COLUMNS: [&str; 5] = [FIRST_NAME, LAST_NAME, CITY, STATE, ADDRESS];

/// One input row. Identity is its position in the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadRecord {
    /// Field name/value pairs in column order
    fields: Vec<(String, String)>,
    outcome: Option<EnrichmentOutcome>,
}

impl LeadRecord {
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::default();
        for (name, value) in fields {
            record.set(name.into(), value.into());
        }
        record
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    fn set(&mut self, name: String, value: String) {
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    /// The lookup query for this lead. Missing fields read as empty.
    pub fn query(&self) -> LeadQuery {
        let field = |name| self.get(name).unwrap_or_default().to_string();
        LeadQuery {
            first_name: field(FIRST_NAME),
            last_name: field(LAST_NAME),
            city: field(CITY),
            state: field(STATE),
            address: field(ADDRESS),
        }
    }

    /// Record the enrichment outcome.
    ///
    /// Only the first call takes effect. `phone` and `email` are set only for a
    /// match; a missing email is stored as an empty string. Returns whether the
    /// outcome was applied.
    pub fn apply(&mut self, outcome: EnrichmentOutcome) -> bool {
        if self.outcome.is_some() {
            tracing::debug!("Ignoring second enrichment outcome for record");
            return false;
        }
        if let EnrichmentOutcome::Matched(contact) = &outcome {
            self.set(PHONE.to_string(), contact.phone.clone());
            self.set(EMAIL.to_string(), contact.email.clone().unwrap_or_default());
        }
        self.outcome = Some(outcome);
        true
    }

    pub fn outcome(&self) -> Option<&EnrichmentOutcome> {
        self.outcome.as_ref()
    }

    /// Matched, and therefore part of the output.
    pub fn is_enriched(&self) -> bool {
        self.outcome.as_ref().is_some_and(EnrichmentOutcome::is_matched)
    }
}

/// An input file loaded fully into memory.
#[derive(Debug, Clone, Default)]
pub struct LeadDataset {
    /// Input header row, in file order
    pub headers: Vec<String>,
    pub records: Vec<LeadRecord>,
}

impl LeadDataset {
    /// Build a dataset from records, taking headers from their field names.
    pub fn from_records(records: Vec<LeadRecord>) -> Self {
        let mut headers: Vec<String> = Vec::new();
        for name in records.iter().flat_map(LeadRecord::field_names) {
            if !headers.iter().any(|h| h == name) {
                headers.push(name.to_string());
            }
        }
        Self { headers, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn enriched_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_enriched()).count()
    }
}

/// Lead list errors. Any of these on read aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Failed to read {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to write {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("No lead records found in {0}")]
    Empty(PathBuf),

    #[error("Missing required column '{column}' in {path}")]
    MissingColumn { column: String, path: PathBuf },
}
