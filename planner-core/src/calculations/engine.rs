//! Calculation orchestrator.
//!
//! Composes the deduction resolver, the bracket tax functions, and the
//! credit applier into a single [`TaxCalculation`].
//!
//! | Step | Value |
//! |------|-------|
//! | 1    | Total income (sum of income sources) |
//! | 2    | Total deductions (larger of standard/itemized, plus above-the-line items) |
//! | 3    | Taxable income (step 1 - step 2, minimum 0) |
//! | 4    | Federal tax before credits (federal brackets on step 3) |
//! | 5    | Federal tax (step 4 - credits, minimum 0) |
//! | 6    | State tax (state brackets on step 3; credits do not apply) |
//! | 7    | Effective tax rate ((step 5 + step 6) / step 1, or 0 without income) |
//! | 8    | Take-home income (step 1 - step 5 - step 6) |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use planner_core::calculations::calculate;
//! use planner_core::{BracketTable, TaxBracket, TaxDeductions, UserData, UserIncome};
//!
//! let federal = BracketTable::new(vec![
//!     TaxBracket::bounded(dec!(10000), dec!(0.10)),
//!     TaxBracket::unbounded(dec!(0.22)),
//! ])
//! .unwrap();
//! let state = BracketTable::flat(dec!(0.05)).unwrap();
//!
//! let data = UserData {
//!     income: UserIncome {
//!         salary: dec!(75000),
//!         ..Default::default()
//!     },
//!     deductions: TaxDeductions {
//!         standard_deduction: dec!(12950),
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//!
//! let result = calculate(&data, &federal, &state).unwrap();
//!
//! assert_eq!(result.taxable_income, dec!(62050));
//! assert_eq!(result.federal_tax, dec!(12451.00));
//! assert_eq!(result.state_tax, dec!(3102.50));
//! assert_eq!(result.effective_tax_rate, dec!(0.2074));
//! assert_eq!(result.take_home_income, dec!(59446.50));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::brackets::{compute_bracket_tax, compute_state_tax};
use crate::calculations::common::{max, round_rate};
use crate::calculations::credits::apply_credits;
use crate::calculations::deductions::{
    DeductionLimits, choose_base_deduction, resolve_deductions_with_limits,
};
use crate::calculations::{CalculationError, InputProblem, Jurisdiction};
use crate::models::{BracketTable, TaxCalculation, UserData};

/// A [`TaxCalculation`] together with the intermediate values that produced
/// it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationDetail {
    pub calculation: TaxCalculation,

    /// Federal tax from the brackets, before credits.
    pub pre_credit_federal_tax: Decimal,

    /// Credits that actually reduced federal tax.
    pub credits_applied: Decimal,

    /// Whether itemized deductions were used instead of the standard one.
    pub used_itemized_deduction: bool,
}

/// Tax engine bound to a federal and a state bracket table.
///
/// Construction validates the injected configuration once; every
/// [`calculate`](Self::calculate) call afterwards only reads it, so one
/// engine can be shared across threads.
#[derive(Debug, Clone)]
pub struct TaxEngine<'a> {
    federal: &'a BracketTable,
    state: &'a BracketTable,
    deduction_limits: DeductionLimits,
}

impl<'a> TaxEngine<'a> {
    /// Creates an engine with uncapped deductions.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidBracketTable`] if either table is
    /// malformed, or [`CalculationError::CombinedRateExceedsOne`] if the
    /// highest rates of the two tables together exceed 100%.
    pub fn new(
        federal: &'a BracketTable,
        state: &'a BracketTable,
    ) -> Result<Self, CalculationError> {
        federal
            .validate()
            .map_err(|source| CalculationError::InvalidBracketTable {
                jurisdiction: Jurisdiction::Federal,
                source,
            })?;
        state
            .validate()
            .map_err(|source| CalculationError::InvalidBracketTable {
                jurisdiction: Jurisdiction::State,
                source,
            })?;

        // Keeps federal + state tax at or under taxable income for any
        // table shape, rates falling with income included.
        let (federal_max, state_max) = (federal.max_rate(), state.max_rate());
        if federal_max + state_max > Decimal::ONE {
            return Err(CalculationError::CombinedRateExceedsOne {
                federal: federal_max,
                state: state_max,
            });
        }

        Ok(Self {
            federal,
            state,
            deduction_limits: DeductionLimits::default(),
        })
    }

    /// Replaces the deduction caps.
    pub fn with_deduction_limits(
        mut self,
        limits: DeductionLimits,
    ) -> Result<Self, CalculationError> {
        limits.validate()?;
        self.deduction_limits = limits;
        Ok(self)
    }

    pub fn deduction_limits(&self) -> &DeductionLimits {
        &self.deduction_limits
    }

    /// Runs the full calculation for one household.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidInput`] if any field of
    /// `user_data` is negative, or if the income or deduction total does not
    /// fit in a `Decimal`.
    pub fn calculate(
        &self,
        user_data: &UserData,
    ) -> Result<TaxCalculation, CalculationError> {
        self.calculate_detailed(user_data)
            .map(|detail| detail.calculation)
    }

    /// Like [`calculate`](Self::calculate), also returning the intermediate
    /// values.
    pub fn calculate_detailed(
        &self,
        user_data: &UserData,
    ) -> Result<CalculationDetail, CalculationError> {
        user_data.validate()?;

        let total_income = user_data
            .income
            .total()
            .ok_or(CalculationError::InvalidInput {
                field: "income",
                problem: InputProblem::OutOfRange,
            })?;
        let total_deductions =
            resolve_deductions_with_limits(&user_data.deductions, &self.deduction_limits)?;
        let (_, used_itemized_deduction) = choose_base_deduction(&user_data.deductions);
        let taxable_income = max(total_income - total_deductions, Decimal::ZERO);

        let pre_credit_federal_tax = compute_bracket_tax(taxable_income, self.federal)
            .map_err(|source| CalculationError::InvalidBracketTable {
                jurisdiction: Jurisdiction::Federal,
                source,
            })?;
        let federal_tax = apply_credits(pre_credit_federal_tax, &user_data.credits);

        let state_tax = compute_state_tax(taxable_income, self.state).map_err(|source| {
            CalculationError::InvalidBracketTable {
                jurisdiction: Jurisdiction::State,
                source,
            }
        })?;

        let total_tax = federal_tax
            .checked_add(state_tax)
            .ok_or(CalculationError::InvalidInput {
                field: "income",
                problem: InputProblem::OutOfRange,
            })?;
        let effective_tax_rate = if total_income > Decimal::ZERO {
            round_rate(total_tax / total_income)
        } else {
            Decimal::ZERO
        };
        let take_home_income = total_income - total_tax;

        debug!(
            %total_income,
            %total_deductions,
            %taxable_income,
            %pre_credit_federal_tax,
            %federal_tax,
            %state_tax,
            %effective_tax_rate,
            "tax calculation complete"
        );

        Ok(CalculationDetail {
            calculation: TaxCalculation {
                total_income,
                total_deductions,
                taxable_income,
                federal_tax,
                state_tax,
                effective_tax_rate,
                take_home_income,
            },
            pre_credit_federal_tax,
            credits_applied: pre_credit_federal_tax - federal_tax,
            used_itemized_deduction,
        })
    }
}

/// Calculates taxes for `user_data` under the given tables, with uncapped
/// deductions.
///
/// This is a pure function: identical inputs always give identical results.
///
/// # Errors
///
/// See [`TaxEngine::new`] and [`TaxEngine::calculate`].
pub fn calculate(
    user_data: &UserData,
    federal: &BracketTable,
    state: &BracketTable,
) -> Result<TaxCalculation, CalculationError> {
    TaxEngine::new(federal, state)?.calculate(user_data)
}
