use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::catalog::{
    CHOICE_COUNT, CatalogError, ChoiceQuestion, CodingTopic, DefinitionItem,
};

//
// ─── GAME MODE ────────────────────────────────────────────────────────────────
//

/// The four game modes the engine drives.
///
/// Serialized names are lowercase and match the keys used by the persisted
/// progress record (`flashcards`, `multiple`, `coding`, `timed`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Free-text recall of a term's definition.
    Flashcards,
    /// Authored multiple-choice questions.
    Multiple,
    /// Coding practice topics; submissions are never graded.
    Coding,
    /// Generated choice rounds under a per-question countdown.
    Timed,
}

impl GameMode {
    /// All modes, in dashboard display order.
    pub const ALL: [GameMode; 4] = [
        GameMode::Flashcards,
        GameMode::Multiple,
        GameMode::Coding,
        GameMode::Timed,
    ];

    /// The stable lowercase name used as a storage key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Flashcards => "flashcards",
            GameMode::Multiple => "multiple",
            GameMode::Coding => "coding",
            GameMode::Timed => "timed",
        }
    }

    /// Capitalized display label for dashboards.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            GameMode::Flashcards => "Flashcards",
            GameMode::Multiple => "Multiple",
            GameMode::Coding => "Coding",
            GameMode::Timed => "Timed",
        }
    }
}

/// Lifecycle of one play-through.
///
/// A session object only exists once started; `Completed` and `Abandoned`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    Completed,
    Abandoned,
}

impl SessionStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::Abandoned)
    }
}

//
// ─── SESSION ITEMS ────────────────────────────────────────────────────────────
//

/// A choice round synthesized for the timed challenge.
///
/// Owns its option list outright; the catalog entry it was generated from is
/// never aliased or mutated. The true definition's post-shuffle position is
/// the sole correctness key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceRound {
    term: String,
    options: Vec<String>,
    correct_index: usize,
    explanation: String,
}

impl ChoiceRound {
    /// Create a generated round with exactly [`CHOICE_COUNT`] options.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::WrongOptionCount` or
    /// `CatalogError::CorrectIndexOutOfRange` on malformed input.
    pub fn new(
        term: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
        explanation: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        if options.len() != CHOICE_COUNT {
            return Err(CatalogError::WrongOptionCount(options.len()));
        }
        if correct_index >= options.len() {
            return Err(CatalogError::CorrectIndexOutOfRange(correct_index));
        }
        Ok(Self {
            term: term.into(),
            options,
            correct_index,
            explanation: explanation.into(),
        })
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

/// A catalog item bound to one session's working set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionItem {
    /// Flashcard recall over a definition.
    Recall(DefinitionItem),
    /// An authored multiple-choice question.
    Question(ChoiceQuestion),
    /// A coding practice topic.
    Practice(CodingTopic),
    /// A synthesized timed-challenge round.
    Generated(ChoiceRound),
}

impl SessionItem {
    /// Short text identifying the item, for per-item result logs.
    #[must_use]
    pub fn heading(&self) -> &str {
        match self {
            SessionItem::Recall(item) => item.term(),
            SessionItem::Question(q) => q.prompt(),
            SessionItem::Practice(topic) => topic.title(),
            SessionItem::Generated(round) => round.term(),
        }
    }
}

/// A user answer delivered through the presentation boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Typed free-text answer for flashcard recall.
    Text(String),
    /// Selected option index for choice-style items.
    Choice(usize),
    /// Free-form code for a practice topic.
    Code(String),
}

//
// ─── OUTCOMES ─────────────────────────────────────────────────────────────────
//

/// Correctness verdict for a single submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
    /// Practice submissions carry no correctness; they count as attempted
    /// but never as correct.
    Ungraded,
}

/// What the presentation shows after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub verdict: Verdict,
    /// Reference answer, explanation, or acknowledgment text for feedback.
    pub reference: String,
}

impl Outcome {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.verdict == Verdict::Correct
    }
}

//
// ─── SUMMARY ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("correct count ({correct}) exceeds total ({total})")]
    CountMismatch { correct: u32, total: u32 },

    #[error("finished_at is before started_at")]
    InvalidTimeRange,

    #[error("summary requires a terminal session status")]
    NotTerminal,
}

/// Aggregate summary for a finished (completed or abandoned) session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    mode: GameMode,
    status: SessionStatus,
    correct: u32,
    total: u32,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
}

impl SessionSummary {
    /// Build a summary from a session's final tallies.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::NotTerminal` for an active status,
    /// `SummaryError::CountMismatch` when `correct > total`, and
    /// `SummaryError::InvalidTimeRange` when the timestamps are reversed.
    pub fn new(
        mode: GameMode,
        status: SessionStatus,
        correct: u32,
        total: u32,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Result<Self, SummaryError> {
        if !status.is_terminal() {
            return Err(SummaryError::NotTerminal);
        }
        if correct > total {
            return Err(SummaryError::CountMismatch { correct, total });
        }
        if finished_at < started_at {
            return Err(SummaryError::InvalidTimeRange);
        }
        Ok(Self {
            mode,
            status,
            correct,
            total,
            started_at,
            finished_at,
        })
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
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> DateTime<Utc> {
        self.finished_at
    }
}
