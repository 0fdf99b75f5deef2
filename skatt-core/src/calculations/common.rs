//! Shared rounding helpers for tax calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary value to whole SEK using half-up rounding.
///
/// Midpoints round away from zero, which matches conventional financial
/// rounding on the non-negative amounts this engine produces.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use skatt_core::calculations::common::round_sek;
///
/// assert_eq!(round_sek(dec!(145147.4)), dec!(145147));
/// assert_eq!(round_sek(dec!(145147.5)), dec!(145148));
/// ```
pub fn round_sek(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a percentage to two decimal digits using half-up rounding.
pub fn round_rate(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
