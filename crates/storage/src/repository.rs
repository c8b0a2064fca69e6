use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use quiz_core::model::{ModeTally, ProgressLedger};

/// Errors surfaced by ledger stores.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("no ledger record stored")]
    NotFound,

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape of the progress ledger.
///
/// Mirrors the domain `ProgressLedger` so stores can serialize without
/// leaking storage concerns into the domain layer. Every field defaults to
/// the zero tally, so a record written by an older shape (or with fields
/// missing) merges over defaults rather than failing to decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRecord {
    #[serde(default)]
    pub flashcards: ModeTally,
    #[serde(default)]
    pub multiple: ModeTally,
    #[serde(default)]
    pub coding: ModeTally,
    #[serde(default)]
    pub timed: ModeTally,
}

impl LedgerRecord {
    #[must_use]
    pub fn from_ledger(ledger: &ProgressLedger) -> Self {
        Self {
            flashcards: ledger.tally(quiz_core::model::GameMode::Flashcards),
            multiple: ledger.tally(quiz_core::model::GameMode::Multiple),
            coding: ledger.tally(quiz_core::model::GameMode::Coding),
            timed: ledger.tally(quiz_core::model::GameMode::Timed),
        }
    }

    /// Convert the record back into the domain ledger.
    #[must_use]
    pub fn into_ledger(self) -> ProgressLedger {
        ProgressLedger::new(self.flashcards, self.multiple, self.coding, self.timed)
    }
}

/// Store contract for the progress ledger.
///
/// The record is read once at startup and overwritten wholesale on every
/// fold; there is no partial update.
pub trait LedgerRepository: Send + Sync {
    /// Read the stored ledger.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` when nothing has been stored yet,
    /// `StorageError::Serialization` when the stored record does not decode,
    /// or other storage errors.
    fn load(&self) -> Result<ProgressLedger, StorageError>;

    /// Replace the stored ledger with `ledger` in a single write.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the record cannot be written.
    fn save(&self, ledger: &ProgressLedger) -> Result<(), StorageError>;
}

/// In-memory ledger store for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryLedgerStore {
    record: Arc<Mutex<Option<ProgressLedger>>>,
}

impl InMemoryLedgerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerRepository for InMemoryLedgerStore {
    fn load(&self) -> Result<ProgressLedger, StorageError> {
        let guard = self
            .record
            .lock()
            .map_err(|e: PoisonError<_>| StorageError::Unavailable(e.to_string()))?;
        guard.clone().ok_or(StorageError::NotFound)
    }

    fn save(&self, ledger: &ProgressLedger) -> Result<(), StorageError> {
        let mut guard = self
            .record
            .lock()
            .map_err(|e: PoisonError<_>| StorageError::Unavailable(e.to_string()))?;
        *guard = Some(ledger.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::GameMode;

    #[test]
    fn in_memory_store_round_trips() {
        let store = InMemoryLedgerStore::new();
        assert!(matches!(store.load(), Err(StorageError::NotFound)));

        let mut ledger = ProgressLedger::default();
        ledger.fold(GameMode::Multiple, 4, 10);
        store.save(&ledger).unwrap();

        assert_eq!(store.load().unwrap(), ledger);
    }

    #[test]
    fn record_decode_merges_missing_fields_over_defaults() {
        let record: LedgerRecord =
            serde_json::from_str(r#"{"flashcards":{"correct":3,"total":5}}"#).unwrap();
        let ledger = record.into_ledger();
        assert_eq!(ledger.tally(GameMode::Flashcards), ModeTally::new(3, 5));
        assert_eq!(ledger.tally(GameMode::Coding), ModeTally::default());
    }

    #[test]
    fn record_decode_defaults_missing_tally_fields() {
        let record: LedgerRecord =
            serde_json::from_str(r#"{"timed":{"total":7}}"#).unwrap();
        assert_eq!(record.timed, ModeTally::new(0, 7));
    }
}
