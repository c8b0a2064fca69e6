#![forbid(unsafe_code)]

pub mod json;
pub mod repository;

pub use json::JsonFileLedgerStore;
pub use repository::{InMemoryLedgerStore, LedgerRecord, LedgerRepository, StorageError};
