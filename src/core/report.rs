//! Filename-keyed mapping of originals to their detected duplicates, and
//! its JSON export.

use crate::core::loader::ImageRecord;
use crate::error::ReportError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Default report file name, resolved against the working directory.
pub const REPORT_FILENAME: &str = "duplicates_list.json";

/// One report entry: a search image and everything judged duplicate of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    /// Full path of the search image
    pub location: String,
    /// `"<path> <score>"` per detected duplicate, in detection order
    pub duplicates: Vec<String>,
}

/// The duplicate mapping exported as `duplicates_list.json`.
///
/// Keys stay sorted at all times, so emission order is deterministic
/// without a separate sort pass. Entries are append-only: once a search
/// image gains an entry it is never removed, only extended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DuplicateReport {
    entries: BTreeMap<String, ResultEntry>,
}

impl DuplicateReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `compare` as a duplicate of `search`.
    pub fn record(&mut self, search: &ImageRecord, compare: &ImageRecord, score: f64) {
        self.entries
            .entry(search.filename.clone())
            .or_insert_with(|| ResultEntry {
                location: search.path.display().to_string(),
                duplicates: Vec::new(),
            })
            .duplicates
            .push(format!("{} {}", compare.path.display(), score));
    }

    pub fn get(&self, filename: &str) -> Option<&ResultEntry> {
        self.entries.get(filename)
    }

    /// Number of images with at least one duplicate
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ResultEntry)> {
        self.entries.iter()
    }

    /// Write the report as compact JSON.
    pub fn write_json(&self, path: &Path) -> Result<(), ReportError> {
        let file = File::create(path).map_err(|source| ReportError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GrayImage;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn record(name: &str) -> ImageRecord {
        ImageRecord {
            filename: name.to_string(),
            path: PathBuf::from(format!("/data/{name}")),
            pixels: GrayImage::new(1, 1),
            byte_size: 0,
        }
    }

    #[test]
    fn recording_creates_an_entry_with_location() {
        let mut report = DuplicateReport::new();
        report.record(&record("a.png"), &record("b.png"), 0.0);

        let entry = report.get("a.png").unwrap();
        assert_eq!(entry.location, "/data/a.png");
        assert_eq!(entry.duplicates, vec!["/data/b.png 0".to_string()]);
    }

    #[test]
    fn recording_appends_to_an_existing_entry() {
        let mut report = DuplicateReport::new();
        report.record(&record("a.png"), &record("b.png"), 0.0);
        report.record(&record("a.png"), &record("c.png"), 512.5);

        let entry = report.get("a.png").unwrap();
        assert_eq!(entry.duplicates.len(), 2);
        assert_eq!(entry.duplicates[1], "/data/c.png 512.5");
    }

    #[test]
    fn keys_iterate_in_sorted_order() {
        let mut report = DuplicateReport::new();
        report.record(&record("b.png"), &record("x.png"), 0.0);
        report.record(&record("a.png"), &record("y.png"), 0.0);

        let keys: Vec<_> = report.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["a.png", "b.png"]);
    }

    #[test]
    fn serializes_as_a_flat_mapping() {
        let mut report = DuplicateReport::new();
        report.record(&record("a.png"), &record("b.png"), 0.0);

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "a.png": {
                    "location": "/data/a.png",
                    "duplicates": ["/data/b.png 0"]
                }
            })
        );
    }

    #[test]
    fn empty_report_serializes_as_empty_object() {
        let report = DuplicateReport::new();
        assert_eq!(serde_json::to_string(&report).unwrap(), "{}");
    }

    #[test]
    fn write_json_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(REPORT_FILENAME);

        let mut report = DuplicateReport::new();
        report.record(&record("a.png"), &record("b.png"), 42.0);
        report.write_json(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: DuplicateReport = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn default_report_path_is_relative() {
        assert!(Path::new(REPORT_FILENAME).is_relative());
    }
}
