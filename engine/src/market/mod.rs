//! Deterministic Market Rotation Scheduler.
//!
//! The black-market catalog rotates on a fixed 72-hour window. Rotation is
//! a stateless pure function of wall-clock time: every viewer, however many
//! and whenever they look inside the same window, derives the identical
//! active stock with no persisted rotation state and no server round-trip.
//!
//! # The rotation key
//!
//! Each item's key for a cycle is `frac(sin(cycle + price) * 10000)` — the
//! classic seeded-hash idiom of the original implementation. Reproducing
//! this exact formula is a correctness requirement: substituting another
//! hash changes the displayed stock and breaks parity across
//! reimplementations. It is not open to improvement.

use serde::{Deserialize, Serialize};

use crate::core::cycle::Timestamp;

/// Rotation window: 72 hours, in seconds (the clock unit)
pub const ROTATION_WINDOW_SECS: i64 = 72 * 3600;

/// A catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketItem {
    pub id: String,
    pub label: String,
    /// Price in PiXi; also the per-item component of the rotation seed
    pub price: i64,
}

/// Index of the rotation window containing `now`.
///
/// `offset` shifts the index for preview/testing only and is never
/// persisted.
///
/// # Example
/// ```
/// use agency_sim_core_rs::market::{cycle_index, ROTATION_WINDOW_SECS};
///
/// assert_eq!(cycle_index(0, 0), 0);
/// assert_eq!(cycle_index(ROTATION_WINDOW_SECS - 1, 0), 0);
/// assert_eq!(cycle_index(ROTATION_WINDOW_SECS, 0), 1);
/// assert_eq!(cycle_index(ROTATION_WINDOW_SECS, 2), 3);
/// ```
pub fn cycle_index(now: Timestamp, offset: i64) -> i64 {
    now.div_euclid(ROTATION_WINDOW_SECS) + offset
}

/// Pseudo-random key for one item in one cycle.
///
/// `frac(sin(cycle + price) * 10000)`, always in [0, 1). The fractional
/// part is taken as `x - floor(x)` so negative sines still land in [0, 1).
pub fn rotation_key(cycle: i64, price: i64) -> f64 {
    let x = (((cycle + price) as f64).sin()) * 10000.0;
    x - x.floor()
}

/// The active stock for the window containing `now`.
///
/// Sorts the static catalog by each item's rotation key (ascending, ties
/// broken by item id for full determinism) and takes the first `k`. Two
/// evaluations within the same window yield bit-identical results.
pub fn active_stock(
    catalog: &[MarketItem],
    now: Timestamp,
    offset: i64,
    k: usize,
) -> Vec<MarketItem> {
    let cycle = cycle_index(now, offset);

    let mut keyed: Vec<(f64, &MarketItem)> = catalog
        .iter()
        .map(|item| (rotation_key(cycle, item.price), item))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.id.cmp(&b.1.id)));

    keyed.into_iter().take(k).map(|(_, item)| item.clone()).collect()
}

/// Seconds until the next rotation boundary.
///
/// # Example
/// ```
/// use agency_sim_core_rs::market::{next_rotation_in, ROTATION_WINDOW_SECS};
///
/// assert_eq!(next_rotation_in(0), ROTATION_WINDOW_SECS);
/// assert_eq!(next_rotation_in(ROTATION_WINDOW_SECS - 1), 1);
/// ```
pub fn next_rotation_in(now: Timestamp) -> i64 {
    (cycle_index(now, 0) + 1) * ROTATION_WINDOW_SECS - now
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_key_range() {
        for cycle in -10..10 {
            for price in 0..50 {
                let key = rotation_key(cycle, price);
                assert!((0.0..1.0).contains(&key), "key {} out of range", key);
            }
        }
    }

    #[test]
    fn test_rotation_key_exact_formula() {
        // Pin the formula itself: frac(sin(seed) * 10000)
        let seed = 7 + 120; // cycle 7, price 120
        let x = (seed as f64).sin() * 10000.0;
        assert_eq!(rotation_key(7, 120), x - x.floor());
    }

    #[test]
    fn test_negative_now_uses_euclidean_division() {
        // A clock before the epoch still yields a stable window index
        assert_eq!(cycle_index(-1, 0), -1);
        assert_eq!(cycle_index(-ROTATION_WINDOW_SECS, 0), -1);
        assert_eq!(cycle_index(-ROTATION_WINDOW_SECS - 1, 0), -2);
    }
}
