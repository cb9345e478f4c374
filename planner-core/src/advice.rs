//! Boundary to an external tax-advice service.
//!
//! A generator receives the household profile and its computed
//! [`TaxCalculation`] and returns free-form suggestions. The engine does not
//! depend on this module; callers issue the request themselves after a
//! calculation succeeds and own its cancellation and retry behaviour.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{TaxCalculation, TaxSavingSuggestion, UserData};

/// Failure of the advice boundary. A previously computed
/// [`TaxCalculation`] stays valid; the caller may retry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SuggestionGenerationError {
    /// Suggestions were requested before any calculation exists.
    #[error("taxes must be calculated before requesting suggestions")]
    MissingCalculation,

    #[error("suggestion request failed: {0}")]
    Request(String),

    #[error("suggestion service returned an invalid response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait SuggestionGenerator: Send + Sync {
    async fn generate(
        &self,
        user_data: &UserData,
        calculation: &TaxCalculation,
    ) -> Result<Vec<TaxSavingSuggestion>, SuggestionGenerationError>;
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::calculate;
    use crate::models::BracketTable;

    // ── stub generator ───────────────────────────────────────────────────
    // Suggests maxing retirement contributions when the household has any
    // taxable income left.
    struct RetirementNudge;

    #[async_trait]
    impl SuggestionGenerator for RetirementNudge {
        async fn generate(
            &self,
            user_data: &UserData,
            calculation: &TaxCalculation,
        ) -> Result<Vec<TaxSavingSuggestion>, SuggestionGenerationError> {
            if calculation.taxable_income == Decimal::ZERO {
                return Ok(vec![]);
            }
            Ok(vec![TaxSavingSuggestion {
                title: "Increase retirement contributions".to_string(),
                description: format!(
                    "You contributed {} this year.",
                    user_data.deductions.retirement_contributions
                ),
                estimated_savings: Some(calculation.effective_tax_rate * dec!(1000)),
            }])
        }
    }

    struct Unreachable;

    #[async_trait]
    impl SuggestionGenerator for Unreachable {
        async fn generate(
            &self,
            _user_data: &UserData,
            _calculation: &TaxCalculation,
        ) -> Result<Vec<TaxSavingSuggestion>, SuggestionGenerationError> {
            Err(SuggestionGenerationError::Request("connection refused".into()))
        }
    }

    fn household() -> UserData {
        let mut data = UserData::default();
        data.income.salary = dec!(50000);
        data.deductions.retirement_contributions = dec!(6000);
        data
    }

    #[tokio::test]
    async fn generator_receives_profile_and_result() {
        let table = BracketTable::flat(dec!(0.10)).unwrap();
        let data = household();
        let calc = calculate(&data, &table, &table).unwrap();

        let suggestions = RetirementNudge.generate(&data, &calc).await.unwrap();

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].description, "You contributed 6000 this year.");
    }

    #[tokio::test]
    async fn generator_failure_leaves_calculation_intact() {
        let table = BracketTable::flat(dec!(0.10)).unwrap();
        let data = household();
        let calc = calculate(&data, &table, &table).unwrap();
        let before = calc.clone();

        let result = Unreachable.generate(&data, &calc).await;

        assert_eq!(
            result,
            Err(SuggestionGenerationError::Request(
                "connection refused".to_string()
            ))
        );
        assert_eq!(calc, before);
    }
}
