use quiz_core::model::{GameMode, ProgressLedger};

/// Presentation-agnostic dashboard row for one game mode.
///
/// No pre-formatted strings beyond the stable mode label; the UI decides how
/// to render an unplayed mode (`accuracy_percent == None`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardRow {
    pub mode: GameMode,
    pub label: &'static str,
    pub correct: u32,
    pub total: u32,
    pub accuracy_percent: Option<u32>,
}

/// Rows for the results dashboard, in [`GameMode::ALL`] order.
#[must_use]
pub fn dashboard_rows(ledger: &ProgressLedger) -> Vec<DashboardRow> {
    ledger
        .entries()
        .into_iter()
        .map(|(mode, tally)| DashboardRow {
            mode,
            label: mode.label(),
            correct: tally.correct,
            total: tally.total,
            accuracy_percent: tally.accuracy_percent(),
        })
        .collect()
}
