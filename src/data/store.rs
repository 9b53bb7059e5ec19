// ============================================================
// Layer 4 — JSON Record Store
// ============================================================
// The shipped RecordStore implementation: a JSON file holding
// an array of client objects. The relational CRUD layer that
// normally feeds this pipeline is an external collaborator;
// as far as training is concerned, "the store" is anything
// that returns raw records, and a flat file is enough.
//
// Missing file → empty store (valid outcome, the use case
// reports it as a structured no-data result).
// Malformed JSON → hard error (environment problem, not data).

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::domain::record::RawRecord;
use crate::domain::traits::RecordStore;

/// Reads all client records from a single JSON array file.
pub struct JsonRecordStore {
    /// Path to the JSON file holding an array of record objects
    path: PathBuf,
}

impl JsonRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordStore for JsonRecordStore {
    fn fetch_all(&self) -> Result<Vec<RawRecord>> {
        // A store that does not exist yet holds no records.
        // That case is reported downstream as a no-data result,
        // not as a crash here.
        if !self.path.exists() {
            tracing::warn!(
                "Record file '{}' does not exist — returning empty store",
                self.path.display()
            );
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read record file '{}'", self.path.display()))?;

        let records: Vec<RawRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("Record file '{}' is not a JSON array of objects", self.path.display()))?;

        tracing::info!("Fetched {} records from '{}'", records.len(), self.path.display());
        Ok(records)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_is_empty_store() {
        let store = JsonRecordStore::new("/nonexistent/records.json");
        let records = store.fetch_all().unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_reads_array_of_objects() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": 1, "age": 42}}, {{"id": 2, "age": 31}}]"#).unwrap();

        let store = JsonRecordStore::new(file.path());
        let records = store.fetch_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("age").and_then(|v| v.as_i64()), Some(42));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json at all").unwrap();

        let store = JsonRecordStore::new(file.path());
        assert!(store.fetch_all().is_err());
    }
}
