//! Common utility functions for tax calculations.
//!
//! This module provides shared functionality used across the engine
//! components, including rounding and input checks.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::calculations::{CalculationError, InputProblem};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use planner_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a ratio (such as an effective tax rate) to four decimal places,
/// half-up.
///
/// ```
/// use rust_decimal_macros::dec;
/// use planner_core::calculations::common::round_rate;
///
/// assert_eq!(round_rate(dec!(0.20738)), dec!(0.2074));
/// ```
pub fn round_rate(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}

/// Drops fractions of a cent, rounding toward zero.
///
/// Used for bracket tax so a rounded tax never exceeds the exact one.
///
/// ```
/// use rust_decimal_macros::dec;
/// use planner_core::calculations::common::truncate_cents;
///
/// assert_eq!(truncate_cents(dec!(12722.6054)), dec!(12722.60));
/// assert_eq!(truncate_cents(dec!(0.005)), dec!(0.00));
/// ```
pub fn truncate_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::ToZero)
}

/// Sums `amounts`, or returns `None` if the total does not fit in a
/// [`Decimal`].
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use planner_core::calculations::common::checked_sum;
///
/// assert_eq!(checked_sum([dec!(1.50), dec!(2.25)]), Some(dec!(3.75)));
/// assert_eq!(checked_sum([Decimal::MAX, dec!(1)]), None);
/// ```
pub fn checked_sum(amounts: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
}

/// Returns the maximum of two decimal values.
///
/// ```
/// use rust_decimal_macros::dec;
/// use planner_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Checks that a single input amount is usable by the engine.
///
/// `field` is the dotted path reported back to the caller on failure
/// (e.g. `income.salary`).
pub fn ensure_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<Decimal, CalculationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(CalculationError::InvalidInput {
            field,
            problem: InputProblem::Negative(value),
        });
    }
    Ok(value)
}

/// Converts a floating point amount coming from outside the engine into a
/// [`Decimal`].
///
/// NaN and infinite values are rejected as [`InputProblem::NonFinite`]
/// rather than coerced, finite values beyond `Decimal`'s range as
/// [`InputProblem::OutOfRange`], and negative amounts as
/// [`InputProblem::Negative`].
///
/// ```
/// use rust_decimal_macros::dec;
/// use planner_core::calculations::common::amount_from_f64;
///
/// assert_eq!(amount_from_f64("income.salary", 1250.5).unwrap(), dec!(1250.5));
/// assert!(amount_from_f64("income.salary", f64::NAN).is_err());
/// ```
pub fn amount_from_f64(
    field: &'static str,
    value: f64,
) -> Result<Decimal, CalculationError> {
    if !value.is_finite() {
        return Err(CalculationError::InvalidInput {
            field,
            problem: InputProblem::NonFinite,
        });
    }

    let amount = Decimal::from_f64(value).ok_or(CalculationError::InvalidInput {
        field,
        problem: InputProblem::OutOfRange,
    })?;

    ensure_non_negative(field, amount)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        let result = round_half_up(dec!(123.454));

        assert_eq!(result, dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        let result = round_half_up(dec!(123.455));

        assert_eq!(result, dec!(123.46));
    }

    #[test]
    fn round_half_up_preserves_already_rounded_values() {
        let result = round_half_up(dec!(3102.50));

        assert_eq!(result, dec!(3102.50));
    }

    #[test]
    fn round_half_up_handles_large_values() {
        let result = round_half_up(dec!(999999.999));

        assert_eq!(result, dec!(1000000.00));
    }

    // =========================================================================
    // round_rate tests
    // =========================================================================

    #[test]
    fn round_rate_keeps_four_places() {
        assert_eq!(round_rate(dec!(0.123449)), dec!(0.1234));
        assert_eq!(round_rate(dec!(0.12345)), dec!(0.1235));
    }

    // =========================================================================
    // truncate_cents / checked_sum tests
    // =========================================================================

    #[test]
    fn truncate_cents_never_rounds_up() {
        assert_eq!(truncate_cents(dec!(3.334995)), dec!(3.33));
        assert_eq!(truncate_cents(dec!(0.009)), dec!(0.00));
        assert_eq!(truncate_cents(dec!(1234.56)), dec!(1234.56));
    }

    #[test]
    fn checked_sum_adds_amounts() {
        assert_eq!(
            checked_sum([dec!(60000), dec!(5000), dec!(0.50)]),
            Some(dec!(65000.50))
        );
        assert_eq!(checked_sum([]), Some(Decimal::ZERO));
    }

    #[test]
    fn checked_sum_reports_overflow() {
        assert_eq!(checked_sum([Decimal::MAX, dec!(1)]), None);
    }

    // =========================================================================
    // max tests
    // =========================================================================

    #[test]
    fn max_returns_larger_value() {
        let result = max(dec!(12950.00), dec!(20000.00));

        assert_eq!(result, dec!(20000.00));
    }

    #[test]
    fn max_handles_equal_values() {
        let result = max(dec!(150.00), dec!(150.00));

        assert_eq!(result, dec!(150.00));
    }

    #[test]
    fn max_handles_negative_and_positive() {
        let result = max(dec!(-50.00), dec!(0));

        assert_eq!(result, dec!(0));
    }

    // =========================================================================
    // ensure_non_negative / amount_from_f64 tests
    // =========================================================================

    #[test]
    fn ensure_non_negative_accepts_zero_and_positive() {
        assert_eq!(ensure_non_negative("income.salary", dec!(0)), Ok(dec!(0)));
        assert_eq!(
            ensure_non_negative("income.salary", dec!(75000)),
            Ok(dec!(75000))
        );
    }

    #[test]
    fn ensure_non_negative_accepts_negative_zero() {
        let negative_zero = dec!(0) * dec!(-1);

        assert!(ensure_non_negative("income.salary", negative_zero).is_ok());
    }

    #[test]
    fn ensure_non_negative_rejects_negative() {
        let result = ensure_non_negative("income.salary", dec!(-100));

        assert_eq!(
            result,
            Err(CalculationError::InvalidInput {
                field: "income.salary",
                problem: InputProblem::Negative(dec!(-100)),
            })
        );
    }

    #[test]
    fn amount_from_f64_rejects_nan_and_infinity() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = amount_from_f64("credits.other_credits", value);

            assert_eq!(
                result,
                Err(CalculationError::InvalidInput {
                    field: "credits.other_credits",
                    problem: InputProblem::NonFinite,
                })
            );
        }
    }

    #[test]
    fn amount_from_f64_rejects_negative() {
        let result = amount_from_f64("income.salary", -100.0);

        assert!(matches!(
            result,
            Err(CalculationError::InvalidInput {
                problem: InputProblem::Negative(_),
                ..
            })
        ));
    }

    #[test]
    fn amount_from_f64_reports_huge_finite_value_as_out_of_range() {
        let result = amount_from_f64("income.salary", 1e30);

        assert_eq!(
            result,
            Err(CalculationError::InvalidInput {
                field: "income.salary",
                problem: InputProblem::OutOfRange,
            })
        );
    }

    #[test]
    fn amount_from_f64_converts_finite_value() {
        let result = amount_from_f64("income.salary", 75000.0);

        assert_eq!(result, Ok(dec!(75000)));
    }
}
