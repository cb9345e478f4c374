//! Progressive marginal-rate tax over a [`BracketTable`].
//!
//! Income is taxed slice by slice: the part of taxable income falling in
//! `(previous bound, bound]` is taxed at that bracket's rate and the slices
//! are summed. Only the marginal slice changes rate at a boundary, so the
//! result is continuous and non-decreasing in income.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use planner_core::calculations::compute_bracket_tax;
//! use planner_core::{BracketTable, TaxBracket};
//!
//! let table = BracketTable::new(vec![
//!     TaxBracket::bounded(dec!(10000), dec!(0.10)),
//!     TaxBracket::unbounded(dec!(0.22)),
//! ])
//! .unwrap();
//!
//! // 10000 * 0.10 + 52050 * 0.22
//! assert_eq!(compute_bracket_tax(dec!(62050), &table), Ok(dec!(12451.00)));
//! ```

use rust_decimal::Decimal;
use tracing::trace;

use crate::calculations::common::truncate_cents;
use crate::models::{BracketTable, BracketTableError};

/// Computes tax owed on `taxable_income` under `table`.
///
/// Zero (or negative) income owes nothing. The sum of the slices is
/// truncated to whole cents, so the result never exceeds the exact tax.
///
/// # Errors
///
/// Returns [`BracketTableError`] if the table fails
/// [`BracketTable::validate`].
pub fn compute_bracket_tax(
    taxable_income: Decimal,
    table: &BracketTable,
) -> Result<Decimal, BracketTableError> {
    table.validate()?;

    if taxable_income <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    let mut tax = Decimal::ZERO;
    for (lower, upper, rate) in table.slices() {
        if taxable_income <= lower {
            break;
        }

        let top = upper.map_or(taxable_income, |bound| bound.min(taxable_income));
        let slice_tax = (top - lower) * rate;
        trace!(%lower, %top, %rate, %slice_tax, "bracket slice");
        // Slices sum to at most taxable_income, which is representable.
        tax = tax.saturating_add(slice_tax);
    }

    Ok(truncate_cents(tax))
}

/// Computes state tax on `taxable_income`.
///
/// State tables follow the same rules as federal ones; a flat-rate state is
/// just a table with one unbounded bracket.
pub fn compute_state_tax(
    taxable_income: Decimal,
    table: &BracketTable,
) -> Result<Decimal, BracketTableError> {
    compute_bracket_tax(taxable_income, table)
}
