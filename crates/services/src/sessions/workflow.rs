use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{Catalog, GameMode, Outcome, ProgressLedger, Response, SessionSummary};
use storage::LedgerRepository;

use crate::error::SessionError;
use crate::ledger::LedgerService;

use super::progress::SessionProgress;
use super::service::{SessionService, TimerEvent};
use super::view::{DashboardRow, dashboard_rows};
use crate::timer::TimerToken;

/// Result of scoring the current item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResult {
    pub outcome: Outcome,
    pub progress: SessionProgress,
}

/// Result of advancing past the current item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvanceResult {
    pub is_complete: bool,
    /// Present exactly when this advance completed the session; its tallies
    /// have already been folded into the ledger.
    pub summary: Option<SessionSummary>,
}

/// The presentation boundary: starts sessions, routes events into the
/// active one, and folds finished sessions into the durable ledger.
///
/// Folding happens exactly once per session, on the advance that completes
/// it or on abandonment; abandoned sessions contribute their partial
/// tallies.
#[derive(Clone)]
pub struct GameLoopService {
    clock: Clock,
    catalog: Arc<Catalog>,
    ledger: LedgerService,
}

impl GameLoopService {
    #[must_use]
    pub fn new(clock: Clock, catalog: Arc<Catalog>, store: Arc<dyn LedgerRepository>) -> Self {
        Self {
            clock,
            catalog,
            ledger: LedgerService::load(store),
        }
    }

    /// Start a new session for the given mode.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` when the catalog has no items for the mode.
    pub fn start_session(&self, mode: GameMode) -> Result<SessionService, SessionError> {
        SessionService::start(mode, &self.catalog, self.clock)
    }

    /// Score a user response against the session's current item.
    ///
    /// # Errors
    ///
    /// Propagates the session contract errors of [`SessionService::submit`].
    pub fn submit_current(
        &self,
        session: &mut SessionService,
        response: &Response,
    ) -> Result<AnswerResult, SessionError> {
        let outcome = session.submit(response)?;
        Ok(AnswerResult {
            outcome,
            progress: session.progress(),
        })
    }

    /// Score the current timed round as missed.
    ///
    /// # Errors
    ///
    /// Propagates [`SessionService::timeout_current`] errors.
    pub fn timeout_current(
        &self,
        session: &mut SessionService,
    ) -> Result<AnswerResult, SessionError> {
        let outcome = session.timeout_current()?;
        Ok(AnswerResult {
            outcome,
            progress: session.progress(),
        })
    }

    /// Deliver a timer tick into the session.
    ///
    /// # Errors
    ///
    /// Propagates [`SessionService::tick`] errors.
    pub fn tick(
        &self,
        session: &mut SessionService,
        token: TimerToken,
    ) -> Result<TimerEvent, SessionError> {
        session.tick(token)
    }

    /// Move to the next item; folds the session into the ledger when this
    /// advance completes it.
    ///
    /// # Errors
    ///
    /// Propagates session contract errors and storage failures from the
    /// ledger write.
    pub fn advance_current(
        &self,
        session: &mut SessionService,
    ) -> Result<AdvanceResult, SessionError> {
        session.advance()?;
        if session.is_complete() {
            let summary = self.finish(session)?;
            Ok(AdvanceResult {
                is_complete: true,
                summary: Some(summary),
            })
        } else {
            Ok(AdvanceResult {
                is_complete: false,
                summary: None,
            })
        }
    }

    /// Abandon the session and fold its partial tallies into the ledger.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` when the session already ended,
    /// or a storage failure from the ledger write.
    pub fn abandon(&self, session: &mut SessionService) -> Result<SessionSummary, SessionError> {
        session.abandon()?;
        self.finish(session)
    }

    /// Read-only copy of the cumulative ledger.
    #[must_use]
    pub fn ledger_snapshot(&self) -> ProgressLedger {
        self.ledger.snapshot()
    }

    /// Rows for the results dashboard.
    #[must_use]
    pub fn dashboard(&self) -> Vec<DashboardRow> {
        dashboard_rows(&self.ledger.snapshot())
    }

    fn finish(&self, session: &SessionService) -> Result<SessionSummary, SessionError> {
        let summary = session.summary(self.clock.now())?;
        self.ledger
            .fold(summary.mode(), summary.correct(), summary.total())?;
        Ok(summary)
    }
}
