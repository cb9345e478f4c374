use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a bracket table is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BracketTableError {
    #[error("bracket table has no brackets")]
    Empty,

    /// The first upper bound must leave room above zero.
    #[error("bracket {index} has non-positive upper bound {bound}")]
    NonPositiveBound { index: usize, bound: Decimal },

    #[error("bracket {index} upper bound {bound} does not exceed previous bound {previous}")]
    NonIncreasingBound {
        index: usize,
        bound: Decimal,
        previous: Decimal,
    },

    #[error("bracket {index} rate {rate} is outside [0, 1]")]
    RateOutOfRange { index: usize, rate: Decimal },

    /// Only the last bracket may be unbounded.
    #[error("bracket {index} is unbounded but is not the last bracket")]
    UnboundedBeforeEnd { index: usize },

    #[error("bracket table does not end in an unbounded top bracket")]
    MissingUnboundedTop,
}

/// One marginal bracket: income up to `upper_bound` (exclusive of the
/// previous bracket's bound) is taxed at `rate`.
///
/// `upper_bound` of `None` means the bracket is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn bounded(
        upper_bound: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }
}

/// An ordered progressive rate schedule covering `[0, ∞)`.
///
/// Brackets are listed lowest first. The first bracket starts at zero and
/// each later bracket starts where the previous one ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTable {
    pub brackets: Vec<TaxBracket>,
}

impl BracketTable {
    /// Builds a table and validates it.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, BracketTableError> {
        let table = Self { brackets };
        table.validate()?;
        Ok(table)
    }

    /// A single unbounded bracket, for flat-tax jurisdictions.
    pub fn flat(rate: Decimal) -> Result<Self, BracketTableError> {
        Self::new(vec![TaxBracket::unbounded(rate)])
    }

    /// Checks bounds are positive and strictly increasing, rates are within
    /// `[0, 1]`, and only the last bracket is unbounded.
    pub fn validate(&self) -> Result<(), BracketTableError> {
        if self.brackets.is_empty() {
            return Err(BracketTableError::Empty);
        }

        let last = self.brackets.len() - 1;
        let mut previous = Decimal::ZERO;

        for (index, bracket) in self.brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(BracketTableError::RateOutOfRange {
                    index,
                    rate: bracket.rate,
                });
            }

            match bracket.upper_bound {
                None if index != last => {
                    return Err(BracketTableError::UnboundedBeforeEnd { index });
                }
                None => {}
                Some(_) if index == last => {
                    return Err(BracketTableError::MissingUnboundedTop);
                }
                Some(bound) if bound <= Decimal::ZERO => {
                    return Err(BracketTableError::NonPositiveBound { index, bound });
                }
                Some(bound) if bound <= previous => {
                    return Err(BracketTableError::NonIncreasingBound {
                        index,
                        bound,
                        previous,
                    });
                }
                Some(bound) => previous = bound,
            }
        }

        Ok(())
    }

    /// Rate of the highest bracket, or zero for an empty table.
    pub fn top_rate(&self) -> Decimal {
        self.brackets
            .last()
            .map(|b| b.rate)
            .unwrap_or(Decimal::ZERO)
    }

    /// Highest rate anywhere in the table, or zero for an empty table.
    ///
    /// Rates need not rise with income, so this can exceed
    /// [`top_rate`](Self::top_rate).
    pub fn max_rate(&self) -> Decimal {
        self.brackets
            .iter()
            .map(|b| b.rate)
            .max()
            .unwrap_or(Decimal::ZERO)
    }

    /// Iterates `(lower, upper, rate)` slices, `upper` being `None` for the
    /// top bracket.
    pub fn slices(&self) -> impl Iterator<Item = (Decimal, Option<Decimal>, Decimal)> + '_ {
        let mut lower = Decimal::ZERO;
        self.brackets.iter().map(move |b| {
            let slice = (lower, b.upper_bound, b.rate);
            if let Some(upper) = b.upper_bound {
                lower = upper;
            }
            slice
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn new_accepts_progressive_table() {
        let table = BracketTable::new(vec![
            TaxBracket::bounded(dec!(10000), dec!(0.10)),
            TaxBracket::bounded(dec!(40000), dec!(0.12)),
            TaxBracket::unbounded(dec!(0.22)),
        ]);

        assert!(table.is_ok());
    }

    #[test]
    fn flat_table_is_valid() {
        let table = BracketTable::flat(dec!(0.05)).unwrap();

        assert_eq!(table.brackets.len(), 1);
        assert_eq!(table.top_rate(), dec!(0.05));
    }

    #[test]
    fn max_rate_looks_past_the_top_bracket() {
        let table = BracketTable::new(vec![
            TaxBracket::bounded(dec!(10000), dec!(1)),
            TaxBracket::unbounded(dec!(0)),
        ])
        .unwrap();

        assert_eq!(table.top_rate(), dec!(0));
        assert_eq!(table.max_rate(), dec!(1));
    }

    #[test]
    fn empty_table_is_rejected() {
        assert_eq!(BracketTable::new(vec![]), Err(BracketTableError::Empty));
    }

    #[test]
    fn non_increasing_bounds_are_rejected() {
        let result = BracketTable::new(vec![
            TaxBracket::bounded(dec!(10000), dec!(0.10)),
            TaxBracket::bounded(dec!(10000), dec!(0.12)),
            TaxBracket::unbounded(dec!(0.22)),
        ]);

        assert_eq!(
            result,
            Err(BracketTableError::NonIncreasingBound {
                index: 1,
                bound: dec!(10000),
                previous: dec!(10000),
            })
        );
    }

    #[test]
    fn zero_first_bound_is_rejected() {
        let result = BracketTable::new(vec![
            TaxBracket::bounded(dec!(0), dec!(0.10)),
            TaxBracket::unbounded(dec!(0.22)),
        ]);

        assert_eq!(
            result,
            Err(BracketTableError::NonPositiveBound {
                index: 0,
                bound: dec!(0),
            })
        );
    }

    #[test]
    fn rates_outside_unit_interval_are_rejected() {
        let too_high = BracketTable::flat(dec!(1.01));
        let negative = BracketTable::new(vec![
            TaxBracket::bounded(dec!(5000), dec!(-0.01)),
            TaxBracket::unbounded(dec!(0.10)),
        ]);

        assert_eq!(
            too_high,
            Err(BracketTableError::RateOutOfRange {
                index: 0,
                rate: dec!(1.01),
            })
        );
        assert_eq!(
            negative,
            Err(BracketTableError::RateOutOfRange {
                index: 0,
                rate: dec!(-0.01),
            })
        );
    }

    #[test]
    fn rate_of_exactly_one_is_allowed() {
        assert!(BracketTable::flat(dec!(1)).is_ok());
    }

    #[test]
    fn bounded_top_bracket_is_rejected() {
        let result = BracketTable::new(vec![
            TaxBracket::bounded(dec!(10000), dec!(0.10)),
            TaxBracket::bounded(dec!(50000), dec!(0.22)),
        ]);

        assert_eq!(result, Err(BracketTableError::MissingUnboundedTop));
    }

    #[test]
    fn unbounded_middle_bracket_is_rejected() {
        let result = BracketTable::new(vec![
            TaxBracket::unbounded(dec!(0.10)),
            TaxBracket::unbounded(dec!(0.22)),
        ]);

        assert_eq!(result, Err(BracketTableError::UnboundedBeforeEnd { index: 0 }));
    }

    #[test]
    fn slices_chain_lower_bounds() {
        let table = BracketTable::new(vec![
            TaxBracket::bounded(dec!(10000), dec!(0.10)),
            TaxBracket::unbounded(dec!(0.22)),
        ])
        .unwrap();

        let slices: Vec<_> = table.slices().collect();

        assert_eq!(
            slices,
            vec![
                (dec!(0), Some(dec!(10000)), dec!(0.10)),
                (dec!(10000), None, dec!(0.22)),
            ]
        );
    }
}
