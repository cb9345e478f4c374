//! The tax calculation engine.
//!
//! Every function here is pure and synchronous: it reads its arguments and
//! the injected bracket tables, and touches no shared state or I/O.

pub mod brackets;
pub mod common;
pub mod credits;
pub mod deductions;
pub mod engine;
mod error;

pub use brackets::{compute_bracket_tax, compute_state_tax};
pub use common::amount_from_f64;
pub use credits::{apply_credits, credits_used};
pub use deductions::{
    DeductionLimits, choose_base_deduction, resolve_deductions, resolve_deductions_with_limits,
};
pub use engine::{CalculationDetail, TaxEngine, calculate};
pub use error::{CalculationError, InputProblem, Jurisdiction};
