//! The module contains the weighted distributor.
//!
//! It splits an integer amount of cents across keyed weights so that the
//! shares always sum to the exact input total. Rounding error is never
//! spread around: every entry except the last in weight order gets its
//! rounded proportional share, and the last entry absorbs whatever is left.
use crate::util::mul_div_round;

/// Splits `total_cents` across `weights` proportionally, exact-sum
/// guaranteed.
///
/// The input is an ordered sequence of `(key, weight)` pairs and the output
/// preserves that order. Internally entries are ranked by weight descending
/// with a stable sort, so equal weights keep their input order; the
/// last-ranked entry (lowest weight, or last inserted among ties) receives
/// the remainder instead of a rounded share. The tie-break is part of the
/// contract: callers and their tests observe it.
///
/// Contract: at least one weight must be strictly positive and none may be
/// negative. Callers ([`crate::allocation`]) check this before calling; an
/// empty input yields an empty output.
pub(crate) fn distribute<K: Copy>(total_cents: i64, weights: &[(K, i64)]) -> Vec<(K, i64)> {
    if weights.is_empty() {
        return Vec::new();
    }

    let total_weight: i64 = weights.iter().map(|&(_, weight)| weight).sum();
    debug_assert!(total_weight > 0, "distribute called with no positive weight");

    let mut ranked: Vec<usize> = (0..weights.len()).collect();
    ranked.sort_by(|&a, &b| weights[b].1.cmp(&weights[a].1));

    let mut shares = vec![0i64; weights.len()];
    let mut remaining = total_cents;
    for (position, &index) in ranked.iter().enumerate() {
        let share = if position + 1 == ranked.len() {
            remaining
        } else {
            mul_div_round(total_cents, weights[index].1, total_weight)
        };
        shares[index] = share;
        remaining -= share;
    }

    weights
        .iter()
        .zip(shares)
        .map(|(&(key, _), share)| (key, share))
        .collect()
}
