use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::BracketTableError;

/// Which bracket table a configuration error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jurisdiction {
    Federal,
    State,
}

impl Jurisdiction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Federal => "federal",
            Self::State => "state",
        }
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an input amount was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputProblem {
    /// The amount is below zero.
    Negative(Decimal),
    /// The amount was NaN or infinite before conversion.
    NonFinite,
    /// The amount, or a total built from it, does not fit in a `Decimal`.
    OutOfRange,
}

impl fmt::Display for InputProblem {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Negative(value) => write!(f, "must not be negative, got {value}"),
            Self::NonFinite => f.write_str("must be a finite number"),
            Self::OutOfRange => f.write_str("is too large to represent"),
        }
    }
}

/// Errors that reject a single calculation call.
///
/// None of these are retried or logged by the engine; the caller decides
/// how to surface them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// A bracket table failed validation.
    #[error("invalid {jurisdiction} bracket table: {source}")]
    InvalidBracketTable {
        jurisdiction: Jurisdiction,
        #[source]
        source: BracketTableError,
    },

    /// The highest federal and state marginal rates together exceed 100%.
    #[error("combined highest marginal rate exceeds 1 (federal {federal}, state {state})")]
    CombinedRateExceedsOne { federal: Decimal, state: Decimal },

    /// An input field, or a total of input fields, was negative, not a
    /// finite number, or too large to represent.
    #[error("invalid input for {field}: {problem}")]
    InvalidInput {
        field: &'static str,
        problem: InputProblem,
    },
}

impl CalculationError {
    /// Returns `true` for errors caused by the injected bracket configuration
    /// rather than by the household's input.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidBracketTable { .. } | Self::CombinedRateExceedsOne { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn invalid_input_message_names_field() {
        let err = CalculationError::InvalidInput {
            field: "income.salary",
            problem: InputProblem::Negative(dec!(-100)),
        };

        assert_eq!(
            err.to_string(),
            "invalid input for income.salary: must not be negative, got -100"
        );
        assert!(!err.is_configuration_error());
    }

    #[test]
    fn bracket_table_error_is_configuration_error() {
        let err = CalculationError::InvalidBracketTable {
            jurisdiction: Jurisdiction::State,
            source: BracketTableError::Empty,
        };

        assert_eq!(
            err.to_string(),
            "invalid state bracket table: bracket table has no brackets"
        );
        assert!(err.is_configuration_error());
    }

    #[test]
    fn out_of_range_message_names_total() {
        let err = CalculationError::InvalidInput {
            field: "income",
            problem: InputProblem::OutOfRange,
        };

        assert_eq!(
            err.to_string(),
            "invalid input for income: is too large to represent"
        );
    }
}
