use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::checked_sum;

/// Household income by source. Every field is a non-negative annual amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserIncome {
    pub salary: Decimal,
    pub business_income: Decimal,
    pub rental_income: Decimal,
    pub investment_income: Decimal,
    pub other_income: Decimal,
}

impl UserIncome {
    /// Sum of every income source, or `None` if it does not fit in a
    /// `Decimal`.
    pub fn total(&self) -> Option<Decimal> {
        checked_sum(self.fields().map(|(_, amount)| amount))
    }

    /// Each field paired with its dotted name, for validation messages.
    pub(crate) fn fields(&self) -> [(&'static str, Decimal); 5] {
        [
            ("income.salary", self.salary),
            ("income.business_income", self.business_income),
            ("income.rental_income", self.rental_income),
            ("income.investment_income", self.investment_income),
            ("income.other_income", self.other_income),
        ]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn total_sums_all_sources() {
        let income = UserIncome {
            salary: dec!(60000),
            business_income: dec!(5000),
            rental_income: dec!(4000),
            investment_income: dec!(3500.50),
            other_income: dec!(2499.50),
        };

        assert_eq!(income.total(), Some(dec!(75000.00)));
    }

    #[test]
    fn default_income_totals_zero() {
        assert_eq!(UserIncome::default().total(), Some(Decimal::ZERO));
    }

    #[test]
    fn total_beyond_decimal_range_is_none() {
        let income = UserIncome {
            salary: Decimal::MAX,
            business_income: dec!(1),
            ..Default::default()
        };

        assert_eq!(income.total(), None);
    }
}
