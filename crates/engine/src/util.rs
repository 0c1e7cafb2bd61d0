//! Internal arithmetic helpers.
//!
//! These utilities are **not** part of the public API. They centralize the
//! rounding rule so distribution shares and percentage charges always agree.

/// Computes `amount * numerator / denominator` rounded to the nearest
/// integer, halves away from zero.
///
/// The intermediate product is widened to `i128`, so no realistic cent
/// amount can overflow. `denominator` must be nonzero; callers check the
/// weight sum before dividing.
pub(crate) fn mul_div_round(amount: i64, numerator: i64, denominator: i64) -> i64 {
    let num = i128::from(amount) * i128::from(numerator);
    let den = i128::from(denominator);
    // (2n ± d) / 2d truncates toward zero, which rounds halves away from it.
    let rounded = (2 * num + num.signum() * den.abs()) / (2 * den);
    rounded as i64
}
