//! Process-wide progress ledger with write-through persistence.

use std::sync::{Arc, Mutex, PoisonError};

use quiz_core::model::{GameMode, ProgressLedger};
use storage::{LedgerRepository, StorageError};

/// Owns the in-memory ledger and keeps the durable record in sync.
///
/// The ledger is loaded once at startup; a missing or undecodable record is
/// silently replaced by the all-zero default. Every fold persists the whole
/// ledger in a single write.
#[derive(Clone)]
pub struct LedgerService {
    repo: Arc<dyn LedgerRepository>,
    ledger: Arc<Mutex<ProgressLedger>>,
}

impl LedgerService {
    /// Load the ledger from `repo`, defaulting on any load failure.
    #[must_use]
    pub fn load(repo: Arc<dyn LedgerRepository>) -> Self {
        let ledger = repo.load().unwrap_or_default();
        Self {
            repo,
            ledger: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Merge a finished session's counts into `mode` and persist.
    ///
    /// Called exactly once per session reaching a terminal state; abandoned
    /// sessions contribute their partial tallies.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the record cannot be written.
    pub fn fold(&self, mode: GameMode, correct: u32, total: u32) -> Result<(), StorageError> {
        let mut guard = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);
        guard.fold(mode, correct, total);
        self.repo.save(&guard)
    }

    /// Read-only copy of the current ledger.
    #[must_use]
    pub fn snapshot(&self) -> ProgressLedger {
        self.ledger
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
