//! Pure answer scoring, one response against one item.

use crate::model::{DefinitionItem, Response, SessionItem, Verdict};

/// Checks a typed answer against a definition's required keywords.
///
/// The input is trimmed and case-folded; every keyword (case-folded) must
/// appear as a substring. Keyword order does not matter and there is no
/// partial credit. Zero required keywords is vacuously true.
#[must_use]
pub fn free_text_matches(input: &str, item: &DefinitionItem) -> bool {
    let text = input.trim().to_lowercase();
    item.keywords()
        .iter()
        .all(|keyword| text.contains(&keyword.to_lowercase()))
}

/// Checks a selected option index against the correct one.
///
/// `None` models a timeout and is always wrong.
#[must_use]
pub fn choice_matches(selected: Option<usize>, correct_index: usize) -> bool {
    selected == Some(correct_index)
}

/// Scores a response against a session item under its mode-specific rule.
///
/// `None` models a timeout. Practice items are never graded; a response of
/// the wrong kind for the item yields `None` so the session controller can
/// reject it as a wiring bug.
#[must_use]
pub fn evaluate(response: Option<&Response>, item: &SessionItem) -> Option<Verdict> {
    let verdict = match (item, response) {
        (SessionItem::Recall(def), Some(Response::Text(text))) => {
            graded(free_text_matches(text, def))
        }
        (SessionItem::Recall(_), None) => Verdict::Incorrect,
        (SessionItem::Question(q), Some(Response::Choice(i))) => {
            graded(choice_matches(Some(*i), q.correct_index()))
        }
        (SessionItem::Question(q), None) => graded(choice_matches(None, q.correct_index())),
        (SessionItem::Generated(round), Some(Response::Choice(i))) => {
            graded(choice_matches(Some(*i), round.correct_index()))
        }
        (SessionItem::Generated(round), None) => {
            graded(choice_matches(None, round.correct_index()))
        }
        (SessionItem::Practice(_), Some(Response::Code(_))) => Verdict::Ungraded,
        _ => return None,
    };
    Some(verdict)
}

fn graded(correct: bool) -> Verdict {
    if correct {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}
