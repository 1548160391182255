//! Enriched lead list export.

use std::io::Write;
use std::path::Path;

use super::{DatasetError, EMAIL, LeadDataset, PHONE};

/// Output header: every input column in first-seen order, then `phone` and
/// `email` unless the input already had them.
pub fn output_headers(dataset: &LeadDataset) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    let names = dataset
        .headers
        .iter()
        .map(String::as_str)
        .chain(dataset.records.iter().flat_map(|r| r.field_names()))
        .chain([PHONE, EMAIL]);

    for name in names {
        if !headers.iter().any(|h| h == name) {
            headers.push(name.to_string());
        }
    }
    headers
}

/// Write matched records to `path`, returning how many rows were written.
///
/// The file is written next to its destination and renamed into place, so a
/// failed run never leaves a half-written output behind.
pub fn write_enriched(path: &Path, dataset: &LeadDataset) -> Result<usize, DatasetError> {
    let temp_path = path.with_extension("csv.tmp");
    let file = std::fs::File::create(&temp_path)
        .map_err(|e| DatasetError::Write(temp_path.clone(), e))?;

    let written = match write_enriched_to(file, dataset) {
        Ok(written) => written,
        Err(e) => {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e);
        }
    };

    std::fs::rename(&temp_path, path).map_err(|e| DatasetError::Write(path.to_path_buf(), e))?;
    tracing::info!("Wrote {} enriched lead(s) to {}", written, path.display());
    Ok(written)
}

/// Write matched records as CSV to any writer.
pub fn write_enriched_to<W: Write>(out: W, dataset: &LeadDataset) -> Result<usize, DatasetError> {
    let headers = output_headers(dataset);
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(&headers)?;

    let mut written = 0;
    for record in dataset.records.iter().filter(|r| r.is_enriched()) {
        writer.write_record(headers.iter().map(|h| record.get(h).unwrap_or_default()))?;
        written += 1;
    }

    writer.flush().map_err(|e| DatasetError::Csv(e.into()))?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{LeadRecord, read_leads, read_leads_from_str};
    use crate::enrichment::{Contact, EnrichmentOutcome};

    fn matched(phone: &str, email: Option<&str>) -> EnrichmentOutcome {
        EnrichmentOutcome::Matched(Contact {
            phone: phone.to_string(),
            email: email.map(String::from),
        })
    }

    fn sample() -> LeadDataset {
        read_leads_from_str(
            "firstName,lastName,City,State,Address\n\
             Ann,Lee,Austin,TX,1 Main St\n\
             Bo,Chan,Reno,NV,7 Bay Rd\n\
             Cy,Park,Waco,TX,3 Elm Rd\n",
            Path::new("leads.csv"),
        )
        .unwrap()
    }

    fn render(dataset: &LeadDataset) -> String {
        let mut out = Vec::new();
        write_enriched_to(&mut out, dataset).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_header_fixed_even_when_nothing_matched() {
        let mut data = sample();
        for record in &mut data.records {
            record.apply(EnrichmentOutcome::NotFound);
        }
        assert_eq!(render(&data), "firstName,lastName,City,State,Address,phone,email\n");
    }

    #[test]
    fn test_only_matched_rows_in_input_order() {
        let mut data = sample();
        data.records[0].apply(matched("p-ann", Some("ann@gmail.com")));
        data.records[1].apply(EnrichmentOutcome::NotFound);
        data.records[2].apply(matched("p-cy", None));

        assert_eq!(
            render(&data),
            "firstName,lastName,City,State,Address,phone,email\n\
             Ann,Lee,Austin,TX,1 Main St,p-ann,ann@gmail.com\n\
             Cy,Park,Waco,TX,3 Elm Rd,p-cy,\n"
        );
    }

    #[test]
    fn test_headers_union_across_records() {
        let mut data = sample();
        data.records.push(LeadRecord::from_fields([("firstName", "Di"), ("Notes", "vip")]));
        let headers = output_headers(&data);
        assert_eq!(
            headers,
            vec!["firstName", "lastName", "City", "State", "Address", "Notes", "phone", "email"]
        );
    }

    #[test]
    fn test_existing_phone_column_not_duplicated() {
        let data = read_leads_from_str(
            "firstName,lastName,City,State,Address,phone\nAnn,Lee,Austin,TX,1 Main St,\n",
            Path::new("leads.csv"),
        )
        .unwrap();
        assert_eq!(
            output_headers(&data),
            vec!["firstName", "lastName", "City", "State", "Address", "phone", "email"]
        );
    }

    #[test]
    fn test_write_file_roundtrip_and_no_temp_left() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let mut data = sample();
        data.records[1].apply(matched("p-bo", Some("bo@yahoo.com")));

        let written = write_enriched(&path, &data).unwrap();

        assert_eq!(written, 1);
        assert!(!path.with_extension("csv.tmp").exists());
        let back = read_leads(&path).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back.records[0].get("phone"), Some("p-bo"));
        assert_eq!(back.records[0].get("email"), Some("bo@yahoo.com"));
    }
}
