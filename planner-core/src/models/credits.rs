use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::checked_sum;

/// Tax credits claimed by the household, each a dollar-for-dollar reduction
/// of federal tax.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxCredits {
    pub child_tax_credit: Decimal,
    pub earned_income_credit: Decimal,
    pub child_and_dependent_care: Decimal,
    pub education_credits: Decimal,
    pub foreign_tax_credit: Decimal,
    pub other_credits: Decimal,
}

impl TaxCredits {
    /// Sum of all credits, or `None` if it does not fit in a `Decimal`.
    pub fn total(&self) -> Option<Decimal> {
        checked_sum(self.fields().map(|(_, amount)| amount))
    }

    pub(crate) fn fields(&self) -> [(&'static str, Decimal); 6] {
        [
            ("credits.child_tax_credit", self.child_tax_credit),
            ("credits.earned_income_credit", self.earned_income_credit),
            ("credits.child_and_dependent_care", self.child_and_dependent_care),
            ("credits.education_credits", self.education_credits),
            ("credits.foreign_tax_credit", self.foreign_tax_credit),
            ("credits.other_credits", self.other_credits),
        ]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn total_sums_all_six_credits() {
        let credits = TaxCredits {
            child_tax_credit: dec!(2000),
            earned_income_credit: dec!(600),
            child_and_dependent_care: dec!(1050),
            education_credits: dec!(2500),
            foreign_tax_credit: dec!(150),
            other_credits: dec!(50),
        };

        assert_eq!(credits.total(), Some(dec!(6350)));
    }
}
