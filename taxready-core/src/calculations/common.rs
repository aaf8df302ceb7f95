//! Common arithmetic helpers shared by every engine.
//!
//! All money leaving the engines passes through [`round_half_up`], so every
//! published figure is in whole kobo (two decimal places).

use rust_decimal::{Decimal, RoundingStrategy};

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);
const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly half a kobo are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxready_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(19889.994)), dec!(19889.99));
/// assert_eq!(round_half_up(dec!(19889.995)), dec!(19890.00));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps a value at zero from below.
///
/// Deductions and taxable income never go negative.
pub fn floor_at_zero(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Returns `part` as a percentage of `whole`, rounded to two places.
///
/// A zero (or negative) `whole` yields 0 rather than a division error.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use taxready_core::calculations::common::percentage_of;
///
/// assert_eq!(percentage_of(dec!(19890), dec!(1000000)), dec!(1.99));
/// assert_eq!(percentage_of(dec!(500), Decimal::ZERO), Decimal::ZERO);
/// ```
pub fn percentage_of(
    part: Decimal,
    whole: Decimal,
) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round_half_up(part / whole * ONE_HUNDRED)
}

/// Spreads an annual amount evenly over twelve months.
pub fn monthly(annual: Decimal) -> Decimal {
    round_half_up(annual / MONTHS_PER_YEAR)
}
