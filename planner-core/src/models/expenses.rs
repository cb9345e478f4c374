use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::checked_sum;

/// Annual household spending by category.
///
/// Expenses are informational. They never reduce taxable income on their
/// own; a caller that wants one to count must map it into
/// [`TaxDeductions`](crate::TaxDeductions) first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserExpenses {
    pub housing: Decimal,
    pub transportation: Decimal,
    pub food: Decimal,
    pub healthcare: Decimal,
    pub education: Decimal,
    pub retirement: Decimal,
    pub insurance: Decimal,
    pub other_expenses: Decimal,
}

impl UserExpenses {
    pub fn total(&self) -> Option<Decimal> {
        checked_sum(self.fields().map(|(_, amount)| amount))
    }

    pub(crate) fn fields(&self) -> [(&'static str, Decimal); 8] {
        [
            ("expenses.housing", self.housing),
            ("expenses.transportation", self.transportation),
            ("expenses.food", self.food),
            ("expenses.healthcare", self.healthcare),
            ("expenses.education", self.education),
            ("expenses.retirement", self.retirement),
            ("expenses.insurance", self.insurance),
            ("expenses.other_expenses", self.other_expenses),
        ]
    }
}
