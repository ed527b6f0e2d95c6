//! Raw CSV ingestion for NAACC survey tables (§4.1 step 1).
//!
//! NAACC exports are sometimes produced by tools that emit a UTF-8 BOM or
//! UTF-16 encoding; `encoding_rs` sniffs the leading bytes before handing
//! the csv crate a clean UTF-8 string to parse. Every row becomes a
//! `HashMap<String, String>` keyed by the source header -- the table
//! carries many more columns than this crate consumes, and flexible
//! keying lets the rest of the pipeline reach for only the fields it
//! knows about.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{WorkflowError, WorkflowResult};

/// Decode a NAACC CSV file's raw bytes to a UTF-8 `String`, detecting a
/// byte-order mark for UTF-8, UTF-16LE, or UTF-16BE. Falls back to
/// lossy UTF-8 decoding when no BOM is present.
pub fn decode_naacc_bytes(bytes: &[u8]) -> String {
    let (encoding, bom_len) = encoding_rs::Encoding::for_bom(bytes).unwrap_or((encoding_rs::UTF_8, 0));
    let (decoded, _, _) = encoding.decode(&bytes[bom_len..]);
    decoded.into_owned()
}

/// Read a NAACC CSV table from disk into a header-keyed row sequence.
/// Empty strings are preserved as empty strings, not normalized to
/// `None` here -- each downstream field parser decides how to treat a
/// blank cell.
pub fn read_naacc_csv(path: impl AsRef<Path>) -> WorkflowResult<Vec<HashMap<String, String>>> {
    let path = path.as_ref();
    let raw = fs::read(path).map_err(|source| WorkflowError::NaaccReadFailure {
        path: path.to_path_buf(),
        source: Box::new(source),
    })?;
    let text = decode_naacc_bytes(&raw);

    let mut reader = ReaderBuilder::new().flexible(true).from_reader(text.as_bytes());
    let headers = reader.headers().map_err(WorkflowError::Csv)?.clone();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(WorkflowError::Csv)?;
        let row: HashMap<String, String> = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_plain_utf8_without_bom() {
        let text = decode_naacc_bytes(b"a,b\n1,2\n");
        assert_eq!(text, "a,b\n1,2\n");
    }

    #[test]
    fn decodes_utf8_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"a,b\n1,2\n");
        let text = decode_naacc_bytes(&bytes);
        assert_eq!(text, "a,b\n1,2\n");
    }
}
