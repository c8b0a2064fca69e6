//! Unbiased shuffling and sampling over catalog slices.

use rand::rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::error::SamplingError;

/// Fisher-Yates shuffle in place. Empty and singleton slices are no-ops.
pub fn shuffle_in_place<T>(items: &mut [T]) {
    let mut rng = rng();
    items.shuffle(&mut rng);
}

/// Returns a uniformly random permutation of `items`.
#[must_use]
pub fn shuffled<T>(mut items: Vec<T>) -> Vec<T> {
    shuffle_in_place(&mut items);
    items
}

/// Draws `k` elements without replacement from the subset of `pool` not
/// matched by `exclude`.
///
/// # Errors
///
/// Returns `SamplingError::InsufficientPool` when fewer than `k` eligible
/// elements exist; a short sample is never returned silently.
pub fn sample_distinct<T: Clone>(
    pool: &[T],
    exclude: impl Fn(&T) -> bool,
    k: usize,
) -> Result<Vec<T>, SamplingError> {
    let eligible: Vec<&T> = pool.iter().filter(|item| !exclude(item)).collect();
    if eligible.len() < k {
        return Err(SamplingError::InsufficientPool {
            needed: k,
            available: eligible.len(),
        });
    }
    let mut rng = rng();
    Ok(eligible
        .choose_multiple(&mut rng, k)
        .map(|item| (*item).clone())
        .collect())
}
