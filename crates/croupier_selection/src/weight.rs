//! Recency weights.

use chrono::{DateTime, Utc};

/// Weight of an item with no ledger record.
pub const NEVER_SHOWN_WEIGHT: u64 = 103;

/// Ages beyond this many days weigh the same as this many days.
pub const MAX_DAYS: i64 = 60;

/// Divisor of the quadratic decay curve.
pub const DECAY_DIVISOR: u64 = 35;

/// Weight of an item given when it was last shown.
///
/// Unrecorded items weigh [`NEVER_SHOWN_WEIGHT`]. Recorded items weigh
/// `ceil(days² / 35)` with `days` capped at [`MAX_DAYS`], and never less
/// than 1. Timestamps in the future count as zero days.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use croupier_selection::recency_weight;
///
/// let now = Utc::now();
/// assert_eq!(recency_weight(None, now), 103);
/// assert_eq!(recency_weight(Some(now - Duration::days(10)), now), 3);
/// assert_eq!(recency_weight(Some(now), now), 1);
/// ```
pub fn recency_weight(last_posted: Option<DateTime<Utc>>, now: DateTime<Utc>) -> u64 {
    let Some(last_posted) = last_posted else {
        return NEVER_SHOWN_WEIGHT;
    };

    let days = (now - last_posted).num_days().clamp(0, MAX_DAYS) as u64;
    (days * days).div_ceil(DECAY_DIVISOR).max(1)
}
