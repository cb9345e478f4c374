use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A piece of tax-saving advice returned by a
/// [`SuggestionGenerator`](crate::advice::SuggestionGenerator).
///
/// The engine never produces or inspects these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSavingSuggestion {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub estimated_savings: Option<Decimal>,
}
