//! Weighted random draw over cumulative weights.

use rand::Rng;

/// Running totals of `weights`.
pub fn cumulative_weights(weights: &[u64]) -> Vec<u64> {
    weights
        .iter()
        .scan(0u64, |total, w| {
            *total = total.saturating_add(*w);
            Some(*total)
        })
        .collect()
}

/// Index selected by `roll` over `cumulative` totals.
///
/// `roll` must lie in `0..total` where `total` is the last cumulative value.
/// Item `i` owns the rolls in `cumulative[i-1]..cumulative[i]`, so each item
/// is hit by exactly as many rolls as its weight.
///
/// # Examples
///
/// ```
/// use croupier_selection::{cumulative_weights, draw_index};
///
/// let cumulative = cumulative_weights(&[1, 103]);
/// assert_eq!(draw_index(&cumulative, 0), 0);
/// assert_eq!(draw_index(&cumulative, 1), 1);
/// assert_eq!(draw_index(&cumulative, 103), 1);
/// ```
pub fn draw_index(cumulative: &[u64], roll: u64) -> usize {
    cumulative
        .partition_point(|&total| total <= roll)
        .min(cumulative.len().saturating_sub(1))
}

/// Pick an index with probability proportional to its weight.
///
/// Returns `None` for an empty slice or when every weight is zero.
pub fn weighted_pick<R: Rng + ?Sized>(weights: &[u64], rng: &mut R) -> Option<usize> {
    let cumulative = cumulative_weights(weights);
    let total = *cumulative.last()?;
    if total == 0 {
        return None;
    }
    Some(draw_index(&cumulative, rng.gen_range(0..total)))
}
