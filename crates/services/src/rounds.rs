//! Timed-challenge round synthesis.

use rand::Rng;

use quiz_core::model::{CHOICE_COUNT, ChoiceRound, DefinitionItem};

use crate::error::SessionError;
use crate::shuffle::{sample_distinct, shuffle_in_place};

/// Distractors drawn for each generated round.
pub const DISTRACTOR_COUNT: usize = CHOICE_COUNT - 1;

/// Builds a choice round for `item`: three distractor definitions drawn
/// uniformly without replacement from the other items in `pool`, combined
/// with the true definition into one random permutation.
///
/// The round owns copies of all texts; the catalog entry is never touched.
///
/// # Errors
///
/// Returns `SessionError::Sampling` when `pool` holds fewer than
/// [`DISTRACTOR_COUNT`] other items.
pub fn synthesize_choice_round(
    item: &DefinitionItem,
    pool: &[DefinitionItem],
) -> Result<ChoiceRound, SessionError> {
    let distractors = sample_distinct(pool, |other| other.term() == item.term(), DISTRACTOR_COUNT)?;

    let mut options: Vec<String> = distractors
        .into_iter()
        .map(|d| d.definition().to_owned())
        .collect();
    shuffle_in_place(&mut options);

    // Placing the true definition at a uniformly random slot of the shuffled
    // distractors yields a uniform permutation of all four options.
    let correct_index = rand::rng().random_range(0..CHOICE_COUNT);
    options.insert(correct_index, item.definition().to_owned());

    Ok(ChoiceRound::new(
        item.term(),
        options,
        correct_index,
        item.definition(),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SamplingError;

    fn pool() -> Vec<DefinitionItem> {
        ["Latency", "Training", "Deployment", "Dataset", "Sampling bias"]
            .iter()
            .map(|term| {
                DefinitionItem::new(*term, format!("definition of {term}"), vec![]).unwrap()
            })
            .collect()
    }

    #[test]
    fn round_keys_on_the_true_definition() {
        let pool = pool();
        let round = synthesize_choice_round(&pool[0], &pool).unwrap();

        assert_eq!(round.options().len(), CHOICE_COUNT);
        assert_eq!(round.options()[round.correct_index()], pool[0].definition());
        assert_eq!(round.term(), "Latency");
        assert_eq!(round.explanation(), pool[0].definition());
    }

    #[test]
    fn distractors_never_repeat_the_items_own_definition() {
        let pool = pool();
        for _ in 0..20 {
            let round = synthesize_choice_round(&pool[2], &pool).unwrap();
            let hits = round
                .options()
                .iter()
                .filter(|opt| opt.as_str() == pool[2].definition())
                .count();
            assert_eq!(hits, 1);
        }
    }

    #[test]
    fn starved_pool_is_reported() {
        let pool = pool();
        let err = synthesize_choice_round(&pool[0], &pool[..3]).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Sampling(SamplingError::InsufficientPool {
                needed: DISTRACTOR_COUNT,
                available: 2
            })
        ));
    }
}
