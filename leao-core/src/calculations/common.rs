//! Shared helpers for monetary arithmetic.

use rust_decimal::Decimal;

/// Rounds to two decimal places, half-up (midpoints go away from zero).
///
/// Every intermediate monetary value in the calculations goes through this,
/// so results stay representable as centavos.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use leao_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(10.004)), dec!(10.00));
/// assert_eq!(round_half_up(dec!(10.005)), dec!(10.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Floors a value at zero.
///
/// Taxable bases and liabilities never go negative; a deduction larger than
/// the income it offsets simply zeroes the base.
pub fn non_negative(value: Decimal) -> Decimal {
    if value > Decimal::ZERO {
        value
    } else {
        Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_half_up_below_midpoint_rounds_down() {
        assert_eq!(round_half_up(dec!(1.234)), dec!(1.23));
    }

    #[test]
    fn round_half_up_at_midpoint_rounds_away_from_zero() {
        assert_eq!(round_half_up(dec!(1.235)), dec!(1.24));
        assert_eq!(round_half_up(dec!(-1.235)), dec!(-1.24));
    }

    #[test]
    fn round_half_up_keeps_exact_values() {
        assert_eq!(round_half_up(dec!(1.23)), dec!(1.23));
        assert_eq!(round_half_up(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn non_negative_passes_positive_values_through() {
        assert_eq!(non_negative(dec!(42.00)), dec!(42.00));
    }

    #[test]
    fn non_negative_floors_negative_values() {
        assert_eq!(non_negative(dec!(-0.01)), Decimal::ZERO);
        assert_eq!(non_negative(dec!(-1000.00)), Decimal::ZERO);
    }
}
