//! Resolves a household's deductions to a single deductible amount.
//!
//! The household takes whichever of the standard deduction and itemized
//! deductions is larger, never both. The above-the-line items are added on
//! top, optionally capped by [`DeductionLimits`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{checked_sum, ensure_non_negative, max, round_half_up};
use crate::calculations::{CalculationError, InputProblem};
use crate::models::TaxDeductions;

/// Optional caps on the above-the-line deductions.
///
/// A `None` field leaves that item uncapped. The default caps nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductionLimits {
    pub qualified_business_income: Option<Decimal>,
    pub retirement_contributions: Option<Decimal>,
    pub health_savings_account: Option<Decimal>,
    pub student_loan_interest: Option<Decimal>,
    pub other_deductions: Option<Decimal>,
}

impl DeductionLimits {
    /// Caps must not be negative.
    pub fn validate(&self) -> Result<(), CalculationError> {
        [
            (
                "deduction_limits.qualified_business_income",
                self.qualified_business_income,
            ),
            (
                "deduction_limits.retirement_contributions",
                self.retirement_contributions,
            ),
            (
                "deduction_limits.health_savings_account",
                self.health_savings_account,
            ),
            (
                "deduction_limits.student_loan_interest",
                self.student_loan_interest,
            ),
            ("deduction_limits.other_deductions", self.other_deductions),
        ]
        .into_iter()
        .filter_map(|(field, cap)| cap.map(|cap| (field, cap)))
        .try_for_each(|(field, cap)| ensure_non_negative(field, cap).map(|_| ()))
    }
}

fn capped(
    amount: Decimal,
    cap: Option<Decimal>,
) -> Decimal {
    cap.map_or(amount, |cap| amount.min(cap))
}

/// Larger of standard and itemized deductions, and whether itemized won.
///
/// Ties go to the standard deduction.
pub fn choose_base_deduction(deductions: &TaxDeductions) -> (Decimal, bool) {
    let used_itemized = deductions.itemized_deductions > deductions.standard_deduction;
    let base = max(deductions.standard_deduction, deductions.itemized_deductions);
    (base, used_itemized)
}

/// Total deductible amount with no caps applied.
///
/// ```
/// use rust_decimal_macros::dec;
/// use planner_core::TaxDeductions;
/// use planner_core::calculations::resolve_deductions;
///
/// let deductions = TaxDeductions {
///     standard_deduction: dec!(12950),
///     itemized_deductions: dec!(20000),
///     ..Default::default()
/// };
///
/// assert_eq!(resolve_deductions(&deductions), Ok(dec!(20000)));
/// ```
///
/// # Errors
///
/// Returns [`CalculationError::InvalidInput`] with
/// [`InputProblem::OutOfRange`] if the total does not fit in a `Decimal`.
pub fn resolve_deductions(deductions: &TaxDeductions) -> Result<Decimal, CalculationError> {
    resolve_deductions_with_limits(deductions, &DeductionLimits::default())
}

/// Total deductible amount, capping each above-the-line item at its limit.
pub fn resolve_deductions_with_limits(
    deductions: &TaxDeductions,
    limits: &DeductionLimits,
) -> Result<Decimal, CalculationError> {
    let (base, _) = choose_base_deduction(deductions);

    let total = checked_sum([
        base,
        capped(
            deductions.qualified_business_income,
            limits.qualified_business_income,
        ),
        capped(
            deductions.retirement_contributions,
            limits.retirement_contributions,
        ),
        capped(
            deductions.health_savings_account,
            limits.health_savings_account,
        ),
        capped(
            deductions.student_loan_interest,
            limits.student_loan_interest,
        ),
        capped(deductions.other_deductions, limits.other_deductions),
    ])
    .ok_or(CalculationError::InvalidInput {
        field: "deductions",
        problem: InputProblem::OutOfRange,
    })?;

    Ok(round_half_up(total))
}
