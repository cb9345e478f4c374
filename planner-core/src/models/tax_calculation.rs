use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_rate;

/// Result of one engine run. Every field is derived from the input
/// [`UserData`](crate::UserData) and the bracket tables in effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculation {
    pub total_income: Decimal,
    pub total_deductions: Decimal,
    pub taxable_income: Decimal,
    pub federal_tax: Decimal,
    pub state_tax: Decimal,
    pub effective_tax_rate: Decimal,
    pub take_home_income: Decimal,
}

/// Shares of total income going to federal tax, state tax, and the
/// household. Shares are rounded to four places and are all zero when
/// there is no income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeBreakdown {
    pub federal_share: Decimal,
    pub state_share: Decimal,
    pub take_home_share: Decimal,
}

impl TaxCalculation {
    /// Federal plus state tax.
    ///
    /// Engine results always fit; a hand-built value saturates at
    /// `Decimal::MAX`.
    pub fn total_tax(&self) -> Decimal {
        self.federal_tax.saturating_add(self.state_tax)
    }

    pub fn income_breakdown(&self) -> IncomeBreakdown {
        if self.total_income <= Decimal::ZERO {
            return IncomeBreakdown {
                federal_share: Decimal::ZERO,
                state_share: Decimal::ZERO,
                take_home_share: Decimal::ZERO,
            };
        }

        let share = |amount: Decimal| round_rate(amount / self.total_income);
        IncomeBreakdown {
            federal_share: share(self.federal_tax),
            state_share: share(self.state_tax),
            take_home_share: share(self.take_home_income),
        }
    }
}
