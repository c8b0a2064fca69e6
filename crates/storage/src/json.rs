//! JSON file store: one named record holding the whole ledger.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use quiz_core::model::ProgressLedger;

use crate::repository::{LedgerRecord, LedgerRepository, StorageError};

/// Ledger store backed by a single JSON file.
///
/// Every save serializes the entire record to a sibling temp file and
/// renames it over the target, so a crash mid-write never leaves a
/// half-written ledger behind.
#[derive(Debug, Clone)]
pub struct JsonFileLedgerStore {
    path: PathBuf,
}

impl JsonFileLedgerStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl LedgerRepository for JsonFileLedgerStore {
    fn load(&self) -> Result<ProgressLedger, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound);
            }
            Err(err) => return Err(err.into()),
        };
        let record: LedgerRecord = serde_json::from_str(&raw)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok(record.into_ledger())
    }

    fn save(&self, ledger: &ProgressLedger) -> Result<(), StorageError> {
        let record = LedgerRecord::from_ledger(ledger);
        let raw = serde_json::to_string_pretty(&record)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let tmp = self.temp_path();
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
