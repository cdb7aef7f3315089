//! History of completed calculations
//!
//! A [`HistoryStore`] is injected into the session driver instead of the
//! driver touching a well-known file. [`JsonFileStore`] keeps the log as a
//! pretty-printed JSON array on disk; [`MemoryStore`] keeps it in a `Vec`.
//!
//! Every mutation is a whole-log read, change and write. Missing or corrupt
//! storage reads as an empty log.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::session::Evaluation;
use crate::value::Value;

/// One persisted calculation. Field names match the on-disk format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub expression: String,
    #[serde(rename = "resultat")]
    pub result: Value,
}

impl From<Evaluation> for HistoryRecord {
    fn from(evaluation: Evaluation) -> Self {
        Self {
            expression: evaluation.expression,
            result: evaluation.result,
        }
    }
}

impl fmt::Display for HistoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.expression, self.result)
    }
}

#[derive(Debug)]
pub enum HistoryError {
    Io(io::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::Io(e) => write!(f, "History I/O error: {}", e),
            HistoryError::Serialize(e) => write!(f, "History encoding error: {}", e),
        }
    }
}

impl std::error::Error for HistoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HistoryError::Io(e) => Some(e),
            HistoryError::Serialize(e) => Some(e),
        }
    }
}

impl From<io::Error> for HistoryError {
    fn from(e: io::Error) -> Self {
        HistoryError::Io(e)
    }
}

impl From<serde_json::Error> for HistoryError {
    fn from(e: serde_json::Error) -> Self {
        HistoryError::Serialize(e)
    }
}

// RUST CONCEPT: Trait object seam for persistence
// The REPL only sees this trait, so tests can swap in an in-memory store
pub trait HistoryStore {
    /// All records, oldest first. Unreadable storage yields an empty list.
    fn load(&self) -> Vec<HistoryRecord>;

    fn append(&mut self, record: HistoryRecord) -> Result<(), HistoryError>;

    fn clear(&mut self) -> Result<(), HistoryError>;

    /// The last `limit` records, oldest of that window first.
    fn recent(&self, limit: usize) -> Vec<HistoryRecord> {
        let mut records = self.load();
        let skip = records.len().saturating_sub(limit);
        records.split_off(skip)
    }
}

/// History kept as a JSON array at `path`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, records: &[HistoryRecord]) -> Result<(), HistoryError> {
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl HistoryStore for JsonFileStore {
    fn load(&self) -> Vec<HistoryRecord> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "history unreadable, treating as empty"
                );
                return Vec::new();
            }
        };

        match serde_json::from_str(&data) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "history corrupt, treating as empty"
                );
                Vec::new()
            }
        }
    }

    fn append(&mut self, record: HistoryRecord) -> Result<(), HistoryError> {
        let mut records = self.load();
        records.push(record);
        self.save(&records)?;
        info!(path = %self.path.display(), count = records.len(), "history record saved");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), HistoryError> {
        self.save(&[])?;
        info!(path = %self.path.display(), "history cleared");
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<HistoryRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryStore {
    fn load(&self) -> Vec<HistoryRecord> {
        self.records.clone()
    }

    fn append(&mut self, record: HistoryRecord) -> Result<(), HistoryError> {
        self.records.push(record);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), HistoryError> {
        self.records.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use tempfile::tempdir;

    fn record(expression: &str, result: f64) -> HistoryRecord {
        HistoryRecord {
            expression: expression.to_string(),
            result: Value::normalize(result),
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");

        fs::write(&path, "{ not json").unwrap();
        assert!(JsonFileStore::new(&path).load().is_empty());

        // Valid JSON but not a list
        fs::write(&path, r#"{"expression": "1.0 + 1.0"}"#).unwrap();
        assert!(JsonFileStore::new(&path).load().is_empty());
    }

    #[test]
    fn test_append_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut store = JsonFileStore::new(&path);
        store.append(record("2.0 + 3.0 * 4.0", 14.0)).unwrap();
        store.append(record("1.0 / 4.0", 0.25)).unwrap();

        let reopened = JsonFileStore::new(&path);
        let records = reopened.load();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].result, Value::Integer(BigInt::from(14)));
        assert_eq!(records[1].to_string(), "1.0 / 4.0 = 0.25");
    }

    #[test]
    fn test_on_disk_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut store = JsonFileStore::new(&path);
        store.append(record("2.0 ^ 3.0", 8.0)).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            raw,
            serde_json::json!([{ "expression": "2.0 ^ 3.0", "resultat": 8 }])
        );
    }

    #[test]
    fn test_large_integers_stored_exactly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");

        let big = record("1e20 + 0.0", 1e20);
        let fact_170 = record("170! + 0.0", crate::unary::factorial(170.0).unwrap());
        let mut store = JsonFileStore::new(&path);
        store.append(big.clone()).unwrap();
        store.append(fact_170.clone()).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"resultat\": 100000000000000000000\n"));
        assert!(raw.contains(&fact_170.result.to_string()));
        assert_eq!(fact_170.result.to_string().len(), 307);

        assert_eq!(JsonFileStore::new(&path).load(), vec![big, fact_170]);
    }

    #[test]
    fn test_clear() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("history.json"));
        store.append(record("1.0 + 1.0", 2.0)).unwrap();
        store.clear().unwrap();
        assert!(store.load().is_empty());
        assert_eq!(fs::read_to_string(store.path()).unwrap().trim(), "[]");
    }

    #[test]
    fn test_recent_window() {
        let mut store = MemoryStore::new();
        for i in 0..12 {
            store.append(record(&format!("{}.0 + 0.0", i), i as f64)).unwrap();
        }

        let recent = store.recent(10);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].expression, "2.0 + 0.0");
        assert_eq!(recent[9].expression, "11.0 + 0.0");

        assert_eq!(store.recent(50).len(), 12);
        assert!(MemoryStore::new().recent(10).is_empty());
    }
}
