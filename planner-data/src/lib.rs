//! Loading the engine's injected configuration and household input.

pub mod brackets;
pub mod config;
pub mod profile;

pub use brackets::{BracketLoaderError, BracketRecord, BracketTableLoader};
pub use config::{ConfigError, LoggingConfig, PlannerConfig};
pub use profile::{HouseholdProfile, ProfileLoadError};
