//! Lead list import.

use std::path::Path;

use super::{DatasetError, LeadDataset, LeadRecord, REQUIRED_COLUMNS};

/// Read a whole lead list into memory.
///
/// Fails if the file can't be read, has no data rows, or lacks any of the
/// required columns.
pub fn read_leads(path: &Path) -> Result<LeadDataset, DatasetError> {
    let bytes = std::fs::read(path).map_err(|e| DatasetError::Read(path.to_path_buf(), e))?;
    let content = decode(bytes);
    let dataset = read_leads_from_str(&content, path)?;
    tracing::info!("Loaded {} lead(s) from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Parse lead list text. `origin` only labels errors.
pub fn read_leads_from_str(content: &str, origin: &Path) -> Result<LeadDataset, DatasetError> {
    let content = content.trim_start_matches('\u{feff}');
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DatasetError::MissingColumn {
                column: column.to_string(),
                path: origin.to_path_buf(),
            });
        }
    }

    for name in duplicate_headers(&headers) {
        tracing::warn!(
            "Column '{}' appears more than once in {}; the last value in each row is kept",
            name,
            origin.display()
        );
    }

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let row = result?;
        if row.len() > headers.len() {
            tracing::warn!(
                record = index,
                "Row has {} cells but the header names {}; extra cells dropped",
                row.len(),
                headers.len()
            );
        }
        // Short rows simply lack the trailing fields
        let record = LeadRecord::from_fields(
            headers
                .iter()
                .zip(row.iter())
                .map(|(name, value)| (name.as_str(), value)),
        );
        records.push(record);
    }

    if records.is_empty() {
        return Err(DatasetError::Empty(origin.to_path_buf()));
    }

    Ok(LeadDataset { headers, records })
}

/// Header names that occur more than once, each reported once.
fn duplicate_headers(headers: &[String]) -> Vec<&str> {
    let mut duplicates: Vec<&str> = Vec::new();
    for (i, name) in headers.iter().enumerate() {
        if headers[..i].contains(name) && !duplicates.contains(&name.as_str()) {
            duplicates.push(name);
        }
    }
    duplicates
}

/// UTF-8 if possible, otherwise Windows-1252 (common for Excel-exported CSVs).
fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    }
}
