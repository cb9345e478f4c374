use serde::{Deserialize, Serialize};

use crate::calculations::CalculationError;
use crate::calculations::common::ensure_non_negative;
use crate::models::{TaxCredits, TaxDeductions, UserExpenses, UserIncome};

/// Snapshot of a household's financial profile for one calculation call.
///
/// The engine only ever reads this value. Callers that keep a profile
/// across edits own it themselves and pass a reference per call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserData {
    pub income: UserIncome,
    pub expenses: UserExpenses,
    pub deductions: TaxDeductions,
    pub credits: TaxCredits,
}

impl UserData {
    /// Rejects the first negative field, in record order
    /// (income, expenses, deductions, credits).
    pub fn validate(&self) -> Result<(), CalculationError> {
        self.income
            .fields()
            .into_iter()
            .chain(self.expenses.fields())
            .chain(self.deductions.fields())
            .chain(self.credits.fields())
            .try_for_each(|(field, amount)| ensure_non_negative(field, amount).map(|_| ()))
    }
}
