use chrono::{DateTime, Utc};

use quiz_core::Clock;
use quiz_core::evaluate;
use quiz_core::model::{
    Catalog, GameMode, Outcome, Response, SessionItem, SessionStatus, SessionSummary, Verdict,
};

use crate::error::SessionError;
use crate::rounds::synthesize_choice_round;
use crate::shuffle::shuffled;
use crate::timer::{Countdown, CountdownTick, FEEDBACK_TICKS, QUESTION_TICKS, TimerToken};

use super::progress::SessionProgress;

/// Timed challenge working sets are capped at this many rounds.
pub const TIMED_SET_CAP: usize = 8;

/// Feedback text for coding practice submissions, which are never executed
/// or graded.
const PRACTICE_ACK: &str = "Code submitted. Execution is not available here.";

/// Scored result for one answered item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemResult {
    pub heading: String,
    pub verdict: Verdict,
}

/// What a delivered timer tick meant to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// The tick belonged to a cancelled or replaced timer; ignore it.
    Stale,
    /// The countdown is still running; presentation may update its bar.
    Running { remaining: u32 },
    /// The per-question countdown ran out: the item was scored as missed.
    TimedOut(Outcome),
    /// The feedback delay elapsed; the caller should advance.
    FeedbackOver,
}

/// Which phase the armed timer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerPhase {
    /// Timed-mode answer countdown.
    Question,
    /// Post-answer feedback delay.
    Feedback,
}

//
// ─── SESSION CONTROLLER ───────────────────────────────────────────────────────
//

/// State machine for one play-through of a game mode.
///
/// Steps through a shuffled working set one item at a time: `submit` (or a
/// countdown timeout) scores the current item, `advance` moves on, and the
/// session ends `Completed` at the end of the set or `Abandoned` when the
/// player leaves. Calling `submit`, `advance`, `timeout_current` or
/// `abandon` on a terminal session is a contract violation.
pub struct SessionService {
    mode: GameMode,
    working_set: Vec<SessionItem>,
    cursor: usize,
    correct: u32,
    total: u32,
    status: SessionStatus,
    answered_current: bool,
    timer: Countdown,
    timer_phase: Option<TimerPhase>,
    results: Vec<ItemResult>,
    started_at: DateTime<Utc>,
}

impl SessionService {
    /// Start a session for `mode` over a shuffled slice of `catalog`.
    ///
    /// Timed mode caps the working set at [`TIMED_SET_CAP`] and synthesizes
    /// one choice round per pick.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when the catalog has no items for the
    /// mode, and `SessionError::Sampling` when distractor synthesis starves
    /// (impossible with four or more definitions).
    pub fn start(mode: GameMode, catalog: &Catalog, clock: Clock) -> Result<Self, SessionError> {
        let working_set = match mode {
            GameMode::Flashcards => shuffled(catalog.definitions().to_vec())
                .into_iter()
                .map(SessionItem::Recall)
                .collect(),
            GameMode::Multiple => shuffled(catalog.questions().to_vec())
                .into_iter()
                .map(SessionItem::Question)
                .collect(),
            GameMode::Coding => shuffled(catalog.coding_topics().to_vec())
                .into_iter()
                .map(SessionItem::Practice)
                .collect(),
            GameMode::Timed => {
                let mut picks = shuffled(catalog.definitions().to_vec());
                picks.truncate(TIMED_SET_CAP.min(picks.len()));
                let mut rounds = Vec::with_capacity(picks.len());
                for pick in &picks {
                    let round = synthesize_choice_round(pick, catalog.definitions())?;
                    rounds.push(SessionItem::Generated(round));
                }
                rounds
            }
        };

        if working_set.is_empty() {
            return Err(SessionError::Empty);
        }

        let mut session = Self {
            mode,
            working_set,
            cursor: 0,
            correct: 0,
            total: 0,
            status: SessionStatus::Active,
            answered_current: false,
            timer: Countdown::new(),
            timer_phase: None,
            results: Vec::new(),
            started_at: clock.now(),
        };
        session.arm_question_timer();
        Ok(session)
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    /// Session-local tallies as `(correct, total)`.
    #[must_use]
    pub fn tallies(&self) -> (u32, u32) {
        (self.correct, self.total)
    }

    #[must_use]
    pub fn results(&self) -> &[ItemResult] {
        &self.results
    }

    /// Token of the pending per-item timer, for tick delivery.
    #[must_use]
    pub fn timer_token(&self) -> Option<TimerToken> {
        self.timer.token()
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.working_set.len(),
            answered: self.results.len(),
            remaining: self.working_set.len().saturating_sub(self.cursor),
            is_complete: self.is_complete(),
        }
    }

    /// The item under the cursor.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::OutOfRange` once the cursor has passed the end
    /// of the working set; callers check completion first.
    pub fn current_item(&self) -> Result<&SessionItem, SessionError> {
        self.working_set
            .get(self.cursor)
            .ok_or(SessionError::OutOfRange {
                cursor: self.cursor,
                len: self.working_set.len(),
            })
    }

    /// Score a user response against the current item.
    ///
    /// Increments the session total, and the correct count on a correct
    /// verdict. Does not advance the cursor; the feedback delay timer is
    /// armed instead.
    ///
    /// # Errors
    ///
    /// `SessionError::InvalidState` on a terminal session,
    /// `SessionError::AlreadyAnswered` when the current item was scored
    /// already, `SessionError::ResponseMismatch` when the response kind does
    /// not fit the item, `SessionError::OutOfRange` past the working set.
    pub fn submit(&mut self, response: &Response) -> Result<Outcome, SessionError> {
        self.ensure_active()?;
        if self.answered_current {
            return Err(SessionError::AlreadyAnswered);
        }
        let verdict = evaluate::evaluate(Some(response), self.current_item()?)
            .ok_or(SessionError::ResponseMismatch)?;
        Ok(self.score_current(verdict))
    }

    /// Score the current timed round as missed after its countdown ran out.
    ///
    /// Equivalent to a choice submission of nothing: total + 1, correct + 0.
    ///
    /// # Errors
    ///
    /// `SessionError::NotTimed` outside the timed mode; otherwise the same
    /// contract errors as [`SessionService::submit`].
    pub fn timeout_current(&mut self) -> Result<Outcome, SessionError> {
        self.ensure_active()?;
        if self.mode != GameMode::Timed {
            return Err(SessionError::NotTimed);
        }
        if self.answered_current {
            return Err(SessionError::AlreadyAnswered);
        }
        let verdict = evaluate::evaluate(None, self.current_item()?)
            .ok_or(SessionError::ResponseMismatch)?;
        Ok(self.score_current(verdict))
    }

    /// Move the cursor to the next item, cancelling any pending timer.
    ///
    /// Transitions to `Completed` when the cursor reaches the end of the
    /// working set.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` on a terminal session.
    pub fn advance(&mut self) -> Result<(), SessionError> {
        self.ensure_active()?;
        self.timer.cancel();
        self.timer_phase = None;
        self.cursor += 1;
        self.answered_current = false;
        if self.cursor >= self.working_set.len() {
            self.status = SessionStatus::Completed;
        } else {
            self.arm_question_timer();
        }
        Ok(())
    }

    /// Abandon the session mid-play; its partial tallies remain foldable.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` on a terminal session.
    pub fn abandon(&mut self) -> Result<(), SessionError> {
        self.ensure_active()?;
        self.timer.cancel();
        self.timer_phase = None;
        self.status = SessionStatus::Abandoned;
        Ok(())
    }

    /// Deliver one timer tick.
    ///
    /// Stale tokens are inert, so a timer armed for a previous item can
    /// never fire into the current one.
    ///
    /// # Errors
    ///
    /// Countdown expiry scores a timeout and can surface the same contract
    /// errors as [`SessionService::timeout_current`].
    pub fn tick(&mut self, token: TimerToken) -> Result<TimerEvent, SessionError> {
        match self.timer.tick(token) {
            CountdownTick::Stale => Ok(TimerEvent::Stale),
            CountdownTick::Running { remaining } => Ok(TimerEvent::Running { remaining }),
            CountdownTick::Expired => match self.timer_phase.take() {
                Some(TimerPhase::Question) => {
                    let outcome = self.timeout_current()?;
                    Ok(TimerEvent::TimedOut(outcome))
                }
                Some(TimerPhase::Feedback) | None => Ok(TimerEvent::FeedbackOver),
            },
        }
    }

    /// Freeze the finished session into a summary for folding and display.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Summary` when the session is still active.
    pub fn summary(&self, finished_at: DateTime<Utc>) -> Result<SessionSummary, SessionError> {
        Ok(SessionSummary::new(
            self.mode,
            self.status,
            self.correct,
            self.total,
            self.started_at,
            finished_at,
        )?)
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        if self.status.is_terminal() {
            return Err(SessionError::InvalidState);
        }
        Ok(())
    }

    fn arm_question_timer(&mut self) {
        if self.mode == GameMode::Timed {
            self.timer.arm(QUESTION_TICKS);
            self.timer_phase = Some(TimerPhase::Question);
        }
    }

    fn score_current(&mut self, verdict: Verdict) -> Outcome {
        // current_item was checked by the caller; the cursor is in range.
        let item = &self.working_set[self.cursor];
        let reference = match item {
            SessionItem::Recall(def) => def.definition().to_owned(),
            SessionItem::Question(q) => q.explanation().to_owned(),
            SessionItem::Generated(round) => round.explanation().to_owned(),
            SessionItem::Practice(_) => PRACTICE_ACK.to_owned(),
        };
        self.total = self.total.saturating_add(1);
        if verdict == Verdict::Correct {
            self.correct = self.correct.saturating_add(1);
        }
        self.results.push(ItemResult {
            heading: item.heading().to_owned(),
            verdict,
        });
        self.answered_current = true;
        self.timer.arm(FEEDBACK_TICKS);
        self.timer_phase = Some(TimerPhase::Feedback);
        Outcome { verdict, reference }
    }
}
