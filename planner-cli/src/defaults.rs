use planner_core::{TaxCredits, TaxDeductions, UserData, UserExpenses, UserIncome};
use rust_decimal_macros::dec;

/// The household a new session starts from when no profile is given:
/// a single earner on a 75,000 salary taking the standard deduction.
pub fn sample_profile() -> UserData {
    UserData {
        income: UserIncome {
            salary: dec!(75000),
            ..Default::default()
        },
        expenses: UserExpenses {
            housing: dec!(18000),
            transportation: dec!(5000),
            food: dec!(6000),
            healthcare: dec!(3000),
            education: dec!(0),
            retirement: dec!(6000),
            insurance: dec!(2400),
            other_expenses: dec!(3600),
        },
        deductions: TaxDeductions {
            standard_deduction: dec!(12950),
            retirement_contributions: dec!(6000),
            ..Default::default()
        },
        credits: TaxCredits::default(),
    }
}
