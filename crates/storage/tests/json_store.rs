use std::fs;
use std::path::PathBuf;

use quiz_core::model::{GameMode, ModeTally, ProgressLedger};
use storage::{JsonFileLedgerStore, LedgerRepository, StorageError};

struct TempRecord {
    path: PathBuf,
}

impl TempRecord {
    fn new(tag: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "quiz-ledger-{}-{tag}.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        Self { path }
    }
}

impl Drop for TempRecord {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

#[test]
fn missing_file_reports_not_found() {
    let record = TempRecord::new("missing");
    let store = JsonFileLedgerStore::new(&record.path);
    assert!(matches!(store.load(), Err(StorageError::NotFound)));
}

#[test]
fn save_then_load_round_trips() {
    let record = TempRecord::new("roundtrip");
    let store = JsonFileLedgerStore::new(&record.path);

    let mut ledger = ProgressLedger::default();
    ledger.fold(GameMode::Flashcards, 3, 5);
    ledger.fold(GameMode::Timed, 6, 8);
    store.save(&ledger).unwrap();

    assert_eq!(store.load().unwrap(), ledger);

    // Loading twice with no intervening save yields equal ledgers.
    assert_eq!(store.load().unwrap(), store.load().unwrap());
}

#[test]
fn save_overwrites_the_record_wholesale() {
    let record = TempRecord::new("overwrite");
    let store = JsonFileLedgerStore::new(&record.path);

    let mut first = ProgressLedger::default();
    first.fold(GameMode::Multiple, 9, 10);
    store.save(&first).unwrap();

    let second = ProgressLedger::default();
    store.save(&second).unwrap();

    assert_eq!(store.load().unwrap(), second);
}

#[test]
fn corrupt_record_is_a_serialization_error() {
    let record = TempRecord::new("corrupt");
    fs::write(&record.path, "{not json").unwrap();

    let store = JsonFileLedgerStore::new(&record.path);
    assert!(matches!(store.load(), Err(StorageError::Serialization(_))));
}

#[test]
fn partial_record_merges_over_defaults() {
    let record = TempRecord::new("partial");
    fs::write(&record.path, r#"{"coding":{"correct":1,"total":4}}"#).unwrap();

    let store = JsonFileLedgerStore::new(&record.path);
    let ledger = store.load().unwrap();
    assert_eq!(ledger.tally(GameMode::Coding), ModeTally::new(1, 4));
    assert_eq!(ledger.tally(GameMode::Flashcards), ModeTally::default());
}
