//! Caller-owned planning session.
//!
//! Holds one household's profile while it is being edited, the last
//! calculation for it, and any suggestions fetched for that calculation.
//! Nothing here is global; each caller creates and owns its session.

use planner_core::{
    CalculationError, SuggestionGenerationError, SuggestionGenerator, TaxCalculation, TaxCredits,
    TaxDeductions, TaxEngine, TaxSavingSuggestion, UserData, UserExpenses, UserIncome,
};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use crate::utils::{ParseAmountError, parse_amount};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("{field}: {source}")]
    Amount {
        field: String,
        #[source]
        source: ParseAmountError,
    },
}

#[derive(Debug, Clone, Default)]
pub struct PlannerSession {
    /// Profile restored by [`reset`](Self::reset).
    baseline: UserData,
    user_data: UserData,
    calculation: Option<TaxCalculation>,
    suggestions: Vec<TaxSavingSuggestion>,
}

impl PlannerSession {
    /// Starts a session from `baseline`.
    pub fn new(baseline: UserData) -> Self {
        Self {
            user_data: baseline.clone(),
            baseline,
            calculation: None,
            suggestions: Vec::new(),
        }
    }

    pub fn user_data(&self) -> &UserData {
        &self.user_data
    }

    pub fn calculation(&self) -> Option<&TaxCalculation> {
        self.calculation.as_ref()
    }

    pub fn suggestions(&self) -> &[TaxSavingSuggestion] {
        &self.suggestions
    }

    pub fn update_income(
        &mut self,
        income: UserIncome,
    ) {
        self.user_data.income = income;
        self.invalidate();
    }

    pub fn update_expenses(
        &mut self,
        expenses: UserExpenses,
    ) {
        self.user_data.expenses = expenses;
        self.invalidate();
    }

    pub fn update_deductions(
        &mut self,
        deductions: TaxDeductions,
    ) {
        self.user_data.deductions = deductions;
        self.invalidate();
    }

    pub fn update_credits(
        &mut self,
        credits: TaxCredits,
    ) {
        self.user_data.credits = credits;
        self.invalidate();
    }

    /// Sets one field from user text, addressed by its dotted name
    /// (`income.salary`, `credits.child_tax_credit`, ...).
    ///
    /// Blank text sets the field to zero.
    pub fn set_amount(
        &mut self,
        field: &str,
        text: &str,
    ) -> Result<(), SessionError> {
        let value = parse_amount(text).map_err(|source| SessionError::Amount {
            field: field.to_string(),
            source,
        })?;
        let slot = field_mut(&mut self.user_data, field)
            .ok_or_else(|| SessionError::UnknownField(field.to_string()))?;
        *slot = value;
        self.invalidate();
        Ok(())
    }

    /// Runs the engine on the current profile and keeps the result.
    ///
    /// On failure the previous result, if any, is left untouched.
    pub fn calculate(
        &mut self,
        engine: &TaxEngine<'_>,
    ) -> Result<&TaxCalculation, CalculationError> {
        let calculation = engine.calculate(&self.user_data)?;
        info!(
            taxable_income = %calculation.taxable_income,
            total_tax = %calculation.total_tax(),
            "calculated taxes"
        );
        Ok(self.calculation.insert(calculation))
    }

    /// Asks `generator` for suggestions on the current result.
    ///
    /// Fails with [`SuggestionGenerationError::MissingCalculation`] if
    /// [`calculate`](Self::calculate) has not succeeded since the last edit.
    /// A failed request keeps the calculation and earlier suggestions.
    pub async fn generate_suggestions(
        &mut self,
        generator: &dyn SuggestionGenerator,
    ) -> Result<&[TaxSavingSuggestion], SuggestionGenerationError> {
        let calculation = self
            .calculation
            .as_ref()
            .ok_or(SuggestionGenerationError::MissingCalculation)?;

        let suggestions = generator.generate(&self.user_data, calculation).await?;
        debug!(count = suggestions.len(), "received suggestions");
        self.suggestions = suggestions;
        Ok(&self.suggestions)
    }

    /// Restores the baseline profile and drops results.
    pub fn reset(&mut self) {
        self.user_data = self.baseline.clone();
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.calculation = None;
        self.suggestions.clear();
    }
}

fn field_mut<'a>(
    data: &'a mut UserData,
    field: &str,
) -> Option<&'a mut Decimal> {
    let slot = match field {
        "income.salary" => &mut data.income.salary,
        "income.business_income" => &mut data.income.business_income,
        "income.rental_income" => &mut data.income.rental_income,
        "income.investment_income" => &mut data.income.investment_income,
        "income.other_income" => &mut data.income.other_income,

        "expenses.housing" => &mut data.expenses.housing,
        "expenses.transportation" => &mut data.expenses.transportation,
        "expenses.food" => &mut data.expenses.food,
        "expenses.healthcare" => &mut data.expenses.healthcare,
        "expenses.education" => &mut data.expenses.education,
        "expenses.retirement" => &mut data.expenses.retirement,
        "expenses.insurance" => &mut data.expenses.insurance,
        "expenses.other_expenses" => &mut data.expenses.other_expenses,

        "deductions.standard_deduction" => &mut data.deductions.standard_deduction,
        "deductions.itemized_deductions" => &mut data.deductions.itemized_deductions,
        "deductions.qualified_business_income" => &mut data.deductions.qualified_business_income,
        "deductions.retirement_contributions" => &mut data.deductions.retirement_contributions,
        "deductions.health_savings_account" => &mut data.deductions.health_savings_account,
        "deductions.student_loan_interest" => &mut data.deductions.student_loan_interest,
        "deductions.other_deductions" => &mut data.deductions.other_deductions,

        "credits.child_tax_credit" => &mut data.credits.child_tax_credit,
        "credits.earned_income_credit" => &mut data.credits.earned_income_credit,
        "credits.child_and_dependent_care" => &mut data.credits.child_and_dependent_care,
        "credits.education_credits" => &mut data.credits.education_credits,
        "credits.foreign_tax_credit" => &mut data.credits.foreign_tax_credit,
        "credits.other_credits" => &mut data.credits.other_credits,

        _ => return None,
    };
    Some(slot)
}
