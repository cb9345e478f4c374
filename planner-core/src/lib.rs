pub mod advice;
pub mod calculations;
pub mod models;

pub use advice::{SuggestionGenerationError, SuggestionGenerator};
pub use calculations::{CalculationError, TaxEngine, calculate};
pub use models::*;
