use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::checked_sum;

/// Deduction amounts claimed by the household.
///
/// Only the larger of `standard_deduction` and `itemized_deductions` is ever
/// used. The remaining fields are above-the-line items added on top.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxDeductions {
    pub standard_deduction: Decimal,
    pub itemized_deductions: Decimal,
    pub qualified_business_income: Decimal,
    pub retirement_contributions: Decimal,
    pub health_savings_account: Decimal,
    pub student_loan_interest: Decimal,
    pub other_deductions: Decimal,
}

impl TaxDeductions {
    /// Sum of the items deducted in addition to standard/itemized, or `None`
    /// if it does not fit in a `Decimal`.
    pub fn above_the_line_total(&self) -> Option<Decimal> {
        checked_sum([
            self.qualified_business_income,
            self.retirement_contributions,
            self.health_savings_account,
            self.student_loan_interest,
            self.other_deductions,
        ])
    }

    pub(crate) fn fields(&self) -> [(&'static str, Decimal); 7] {
        [
            ("deductions.standard_deduction", self.standard_deduction),
            ("deductions.itemized_deductions", self.itemized_deductions),
            (
                "deductions.qualified_business_income",
                self.qualified_business_income,
            ),
            (
                "deductions.retirement_contributions",
                self.retirement_contributions,
            ),
            ("deductions.health_savings_account", self.health_savings_account),
            ("deductions.student_loan_interest", self.student_loan_interest),
            ("deductions.other_deductions", self.other_deductions),
        ]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn above_the_line_total_excludes_standard_and_itemized() {
        let deductions = TaxDeductions {
            standard_deduction: dec!(12950),
            itemized_deductions: dec!(20000),
            qualified_business_income: dec!(1000),
            retirement_contributions: dec!(6000),
            health_savings_account: dec!(3000),
            student_loan_interest: dec!(2500),
            other_deductions: dec!(500),
        };

        assert_eq!(deductions.above_the_line_total(), Some(dec!(13000)));
    }
}
