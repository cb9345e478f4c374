mod credits;
mod deductions;
mod expenses;
mod income;
mod suggestion;
mod tax_bracket;
mod tax_calculation;
mod user_data;

pub use credits::TaxCredits;
pub use deductions::TaxDeductions;
pub use expenses::UserExpenses;
pub use income::UserIncome;
pub use suggestion::TaxSavingSuggestion;
pub use tax_bracket::{BracketTable, BracketTableError, TaxBracket};
pub use tax_calculation::{IncomeBreakdown, TaxCalculation};
pub use user_data::UserData;
