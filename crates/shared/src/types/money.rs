//! Monetary rounding with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal`; every boundary that produces a
//! user-facing amount rounds to 2 decimal places, half away from zero.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Number of decimal places for user-facing monetary amounts.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Rounds a monetary amount to 2 decimal places, half away from zero.
///
/// `10.005` rounds to `10.01` and `-10.005` to `-10.01`.
#[must_use]
pub fn round_amount(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(10.005), dec!(10.01))]
    #[case(dec!(10.004), dec!(10.00))]
    #[case(dec!(10.015), dec!(10.02))]
    #[case(dec!(-10.005), dec!(-10.01))]
    #[case(dec!(0.001), dec!(0.00))]
    #[case(dec!(100), dec!(100))]
    #[case(dec!(99.999), dec!(100.00))]
    fn test_round_amount(#[case] input: Decimal, #[case] expected: Decimal) {
        assert_eq!(round_amount(input), expected);
    }

    #[test]
    fn test_round_amount_is_idempotent() {
        let rounded = round_amount(dec!(42.675));
        assert_eq!(round_amount(rounded), rounded);
    }
}
