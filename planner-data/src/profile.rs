//! CSV loader for household profiles.
//!
//! ## CSV Format
//!
//! One household per row. Columns are matched by header name, order does
//! not matter, and **every column is optional**: a missing column or an
//! empty cell is read as zero. Non-numeric and negative amounts are rejected
//! with the 1-based row number.
//!
//! | Group      | Columns |
//! |------------|---------|
//! | label      | `household` (free text, not used in calculations) |
//! | income     | `salary`, `business_income`, `rental_income`, `investment_income`, `other_income` |
//! | expenses   | `housing`, `transportation`, `food`, `healthcare`, `education`, `retirement`, `insurance`, `other_expenses` |
//! | deductions | `standard_deduction`, `itemized_deductions`, `qualified_business_income`, `retirement_contributions`, `health_savings_account`, `student_loan_interest`, `other_deductions` |
//! | credits    | `child_tax_credit`, `earned_income_credit`, `child_and_dependent_care`, `education_credits`, `foreign_tax_credit`, `other_credits` |
//!
//! ### Minimal example
//!
//! ```csv
//! household,salary,standard_deduction
//! Rivera,75000.00,12950.00
//! ```

use std::path::Path;

use planner_core::{TaxCredits, TaxDeductions, UserData, UserExpenses, UserIncome};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvRow {
    household: Option<String>,

    salary: Option<Decimal>,
    business_income: Option<Decimal>,
    rental_income: Option<Decimal>,
    investment_income: Option<Decimal>,
    other_income: Option<Decimal>,

    housing: Option<Decimal>,
    transportation: Option<Decimal>,
    food: Option<Decimal>,
    healthcare: Option<Decimal>,
    education: Option<Decimal>,
    retirement: Option<Decimal>,
    insurance: Option<Decimal>,
    other_expenses: Option<Decimal>,

    standard_deduction: Option<Decimal>,
    itemized_deductions: Option<Decimal>,
    qualified_business_income: Option<Decimal>,
    retirement_contributions: Option<Decimal>,
    health_savings_account: Option<Decimal>,
    student_loan_interest: Option<Decimal>,
    other_deductions: Option<Decimal>,

    child_tax_credit: Option<Decimal>,
    earned_income_credit: Option<Decimal>,
    child_and_dependent_care: Option<Decimal>,
    education_credits: Option<Decimal>,
    foreign_tax_credit: Option<Decimal>,
    other_credits: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A household read from CSV, with its optional label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseholdProfile {
    pub label: Option<String>,
    pub data: UserData,
}

/// Errors that can occur while loading or converting profile CSV data.
#[derive(Debug, Error)]
pub enum ProfileLoadError {
    /// The underlying CSV deserialisation failed (bad structure, a value
    /// that is not a number, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("negative amount {value} in column '{column}' on row {row}")]
    NegativeAmount {
        column: &'static str,
        value: Decimal,
        row: usize,
    },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

/// Blank becomes zero; negatives are rejected here rather than passed on.
fn amount(
    value: Option<Decimal>,
    column: &'static str,
    row: usize,
) -> Result<Decimal, ProfileLoadError> {
    let value = value.unwrap_or(Decimal::ZERO);
    if value < Decimal::ZERO {
        return Err(ProfileLoadError::NegativeAmount { column, value, row });
    }
    Ok(value)
}

/// Convert a single CSV row into a [`HouseholdProfile`].
///
/// `row` is 1-based (for error messages).
fn convert_row(
    r: CsvRow,
    row: usize,
) -> Result<HouseholdProfile, ProfileLoadError> {
    let data = UserData {
        income: UserIncome {
            salary: amount(r.salary, "salary", row)?,
            business_income: amount(r.business_income, "business_income", row)?,
            rental_income: amount(r.rental_income, "rental_income", row)?,
            investment_income: amount(r.investment_income, "investment_income", row)?,
            other_income: amount(r.other_income, "other_income", row)?,
        },
        expenses: UserExpenses {
            housing: amount(r.housing, "housing", row)?,
            transportation: amount(r.transportation, "transportation", row)?,
            food: amount(r.food, "food", row)?,
            healthcare: amount(r.healthcare, "healthcare", row)?,
            education: amount(r.education, "education", row)?,
            retirement: amount(r.retirement, "retirement", row)?,
            insurance: amount(r.insurance, "insurance", row)?,
            other_expenses: amount(r.other_expenses, "other_expenses", row)?,
        },
        deductions: TaxDeductions {
            standard_deduction: amount(r.standard_deduction, "standard_deduction", row)?,
            itemized_deductions: amount(r.itemized_deductions, "itemized_deductions", row)?,
            qualified_business_income: amount(
                r.qualified_business_income,
                "qualified_business_income",
                row,
            )?,
            retirement_contributions: amount(
                r.retirement_contributions,
                "retirement_contributions",
                row,
            )?,
            health_savings_account: amount(
                r.health_savings_account,
                "health_savings_account",
                row,
            )?,
            student_loan_interest: amount(r.student_loan_interest, "student_loan_interest", row)?,
            other_deductions: amount(r.other_deductions, "other_deductions", row)?,
        },
        credits: TaxCredits {
            child_tax_credit: amount(r.child_tax_credit, "child_tax_credit", row)?,
            earned_income_credit: amount(r.earned_income_credit, "earned_income_credit", row)?,
            child_and_dependent_care: amount(
                r.child_and_dependent_care,
                "child_and_dependent_care",
                row,
            )?,
            education_credits: amount(r.education_credits, "education_credits", row)?,
            foreign_tax_credit: amount(r.foreign_tax_credit, "foreign_tax_credit", row)?,
            other_credits: amount(r.other_credits, "other_credits", row)?,
        },
    };

    Ok(HouseholdProfile {
        label: r.household.filter(|s| !s.is_empty()),
        data,
    })
}

/// Parse CSV text and return one profile per row, in file order.
///
/// # Errors
///
/// * [`ProfileLoadError::Parse`] - if the CSV is structurally invalid or a
///   cell is not a number.
/// * [`ProfileLoadError::NegativeAmount`] - if any amount is below zero.
pub fn load_from_str(input: &str) -> Result<Vec<HouseholdProfile>, ProfileLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Convenience wrapper: read a file from disk and delegate to
/// [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<HouseholdProfile>, ProfileLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ProfileLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    const MINIMAL_CSV: &str = "\
household,salary,standard_deduction
Rivera,75000.00,12950.00
";

    const SPARSE_CSV: &str = "\
household,salary,business_income,itemized_deductions,child_tax_credit
Okafor,90000,,21000,2000
,40000,5000,,
";

    #[test]
    fn minimal_row_fills_missing_columns_with_zero() {
        let profiles = load_from_str(MINIMAL_CSV).unwrap();

        assert_eq!(profiles.len(), 1);
        let p = &profiles[0];
        assert_eq!(p.label.as_deref(), Some("Rivera"));
        assert_eq!(p.data.income.salary, dec!(75000.00));
        assert_eq!(p.data.income.business_income, dec!(0));
        assert_eq!(p.data.deductions.standard_deduction, dec!(12950.00));
        assert_eq!(p.data.credits, TaxCredits::default());
        assert_eq!(p.data.expenses, UserExpenses::default());
    }

    #[test]
    fn empty_cells_become_zero() {
        let profiles = load_from_str(SPARSE_CSV).unwrap();

        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].data.income.business_income, dec!(0));
        assert_eq!(profiles[0].data.deductions.itemized_deductions, dec!(21000));
        assert_eq!(profiles[0].data.credits.child_tax_credit, dec!(2000));

        assert_eq!(profiles[1].label, None);
        assert_eq!(profiles[1].data.income.total(), Some(dec!(45000)));
        assert_eq!(profiles[1].data.credits.child_tax_credit, dec!(0));
    }

    #[test]
    fn whitespace_around_values_is_tolerated() {
        let csv = "salary , housing\n 1200.50 ,  300 \n";

        let profiles = load_from_str(csv).unwrap();

        assert_eq!(profiles[0].data.income.salary, dec!(1200.50));
        assert_eq!(profiles[0].data.expenses.housing, dec!(300));
    }

    #[test]
    fn negative_amount_reports_column_and_row() {
        let csv = "salary,rental_income\n50000,0\n60000,-100\n";

        let err = load_from_str(csv).unwrap_err();

        match err {
            ProfileLoadError::NegativeAmount { column, value, row } => {
                assert_eq!(column, "rental_income");
                assert_eq!(value, dec!(-100));
                assert_eq!(row, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_amount_is_a_parse_error() {
        let csv = "salary\nlots\n";

        let result = load_from_str(csv);

        assert!(matches!(result, Err(ProfileLoadError::Parse(_))));
    }

    #[test]
    fn header_only_yields_no_profiles() {
        let profiles = load_from_str("salary,housing\n").unwrap();

        assert!(profiles.is_empty());
    }
}
