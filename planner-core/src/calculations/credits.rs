//! Applies tax credits to computed federal tax.
//!
//! Every credit, the earned income credit included, is treated as a
//! non-refundable dollar-for-dollar reduction: tax after credits never goes
//! below zero and unused credit is lost.

use rust_decimal::Decimal;

use crate::calculations::common::{max, round_half_up};
use crate::models::TaxCredits;

/// Reduces `tax_owed` by the sum of all credits, floored at zero.
///
/// Credits too large to total in a `Decimal` exceed any tax owed, so they
/// floor the result at zero too.
///
/// ```
/// use rust_decimal_macros::dec;
/// use planner_core::TaxCredits;
/// use planner_core::calculations::apply_credits;
///
/// let credits = TaxCredits {
///     child_tax_credit: dec!(800),
///     ..Default::default()
/// };
///
/// assert_eq!(apply_credits(dec!(500), &credits), dec!(0));
/// ```
pub fn apply_credits(
    tax_owed: Decimal,
    credits: &TaxCredits,
) -> Decimal {
    match credits.total() {
        Some(total) => max(round_half_up(tax_owed - total), Decimal::ZERO),
        None => Decimal::ZERO,
    }
}

/// Portion of the credits that actually reduced tax.
pub fn credits_used(
    tax_owed: Decimal,
    credits: &TaxCredits,
) -> Decimal {
    tax_owed - apply_credits(tax_owed, credits)
}
