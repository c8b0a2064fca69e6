use serde::{Deserialize, Serialize};

use crate::model::session::GameMode;

/// Cumulative correct/total counts for one game mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeTally {
    #[serde(default)]
    pub correct: u32,
    #[serde(default)]
    pub total: u32,
}

impl ModeTally {
    #[must_use]
    pub fn new(correct: u32, total: u32) -> Self {
        Self { correct, total }
    }

    /// Add a finished session's counts into this tally.
    pub fn add(&mut self, correct: u32, total: u32) {
        self.correct = self.correct.saturating_add(correct);
        self.total = self.total.saturating_add(total);
    }

    /// Rounded accuracy percentage, or `None` when nothing was answered yet.
    #[must_use]
    pub fn accuracy_percent(&self) -> Option<u32> {
        if self.total == 0 {
            return None;
        }
        // Round half up, matching the dashboard's historical display.
        let scaled = u64::from(self.correct) * 100 + u64::from(self.total) / 2;
        let percent = scaled / u64::from(self.total);
        Some(u32::try_from(percent).unwrap_or(u32::MAX))
    }
}

/// Cross-session accuracy aggregate, one tally per game mode.
///
/// All four modes are always present; a mode that was never played sits at
/// the zero tally. Mutated only by [`ProgressLedger::fold`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressLedger {
    flashcards: ModeTally,
    multiple: ModeTally,
    coding: ModeTally,
    timed: ModeTally,
}

impl ProgressLedger {
    #[must_use]
    pub fn new(
        flashcards: ModeTally,
        multiple: ModeTally,
        coding: ModeTally,
        timed: ModeTally,
    ) -> Self {
        Self {
            flashcards,
            multiple,
            coding,
            timed,
        }
    }

    #[must_use]
    pub fn tally(&self, mode: GameMode) -> ModeTally {
        match mode {
            GameMode::Flashcards => self.flashcards,
            GameMode::Multiple => self.multiple,
            GameMode::Coding => self.coding,
            GameMode::Timed => self.timed,
        }
    }

    /// Merge a finished session's counts into the entry for `mode`.
    pub fn fold(&mut self, mode: GameMode, correct: u32, total: u32) {
        let tally = match mode {
            GameMode::Flashcards => &mut self.flashcards,
            GameMode::Multiple => &mut self.multiple,
            GameMode::Coding => &mut self.coding,
            GameMode::Timed => &mut self.timed,
        };
        tally.add(correct, total);
    }

    /// All tallies in [`GameMode::ALL`] order.
    #[must_use]
    pub fn entries(&self) -> [(GameMode, ModeTally); 4] {
        GameMode::ALL.map(|mode| (mode, self.tally(mode)))
    }
}
