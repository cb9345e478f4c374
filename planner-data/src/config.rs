//! TOML planner configuration.
//!
//! ```toml
//! [federal]
//! brackets = [
//!     { upper_bound = "10000", rate = "0.10" },
//!     { rate = "0.22" },
//! ]
//!
//! [state]
//! brackets = [{ rate = "0.05" }]
//!
//! [deduction_limits]
//! student_loan_interest = "2500"
//!
//! [logging]
//! level = "info"
//! file = "planner.log"
//! ```
//!
//! `[deduction_limits]` and `[logging]` are optional. Both bracket tables are
//! validated at load time.

use std::path::{Path, PathBuf};

use planner_core::calculations::DeductionLimits;
use planner_core::{BracketTable, BracketTableError, CalculationError, TaxEngine};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid [{table}] bracket table: {source}")]
    InvalidTable {
        table: &'static str,
        #[source]
        source: BracketTableError,
    },

    #[error("invalid configuration: {0}")]
    Engine(#[from] CalculationError),
}

/// Optional `[logging]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Bare level or full `EnvFilter` directive.
    pub level: Option<String>,
    /// Append-mode log file.
    pub file: Option<PathBuf>,
}

/// Injected configuration for the tax engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlannerConfig {
    pub federal: BracketTable,
    pub state: BracketTable,
    #[serde(default)]
    pub deduction_limits: DeductionLimits,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PlannerConfig {
    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: PlannerConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Convenience wrapper: read a file from disk and delegate to
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.federal
            .validate()
            .map_err(|source| ConfigError::InvalidTable {
                table: "federal",
                source,
            })?;
        self.state
            .validate()
            .map_err(|source| ConfigError::InvalidTable {
                table: "state",
                source,
            })?;
        // Catches the combined-rate guard and negative caps up front.
        self.engine()?;
        Ok(())
    }

    /// Builds an engine borrowing this configuration's tables.
    pub fn engine(&self) -> Result<TaxEngine<'_>, CalculationError> {
        TaxEngine::new(&self.federal, &self.state)?
            .with_deduction_limits(self.deduction_limits.clone())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use planner_core::TaxBracket;

    const FULL_TOML: &str = r#"
[federal]
brackets = [
    { upper_bound = "10000", rate = "0.10" },
    { rate = "0.22" },
]

[state]
brackets = [{ rate = "0.05" }]

[deduction_limits]
student_loan_interest = "2500"

[logging]
level = "debug"
file = "planner.log"
"#;

    const MINIMAL_TOML: &str = r#"
[federal]
brackets = [{ rate = "0.15" }]

[state]
brackets = [{ rate = "0" }]
"#;

    #[test]
    fn parses_full_config() {
        let config = PlannerConfig::from_toml_str(FULL_TOML).unwrap();

        assert_eq!(
            config.federal.brackets,
            vec![
                TaxBracket::bounded(dec!(10000), dec!(0.10)),
                TaxBracket::unbounded(dec!(0.22)),
            ]
        );
        assert_eq!(config.state.top_rate(), dec!(0.05));
        assert_eq!(
            config.deduction_limits.student_loan_interest,
            Some(dec!(2500))
        );
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(config.logging.file, Some(PathBuf::from("planner.log")));
    }

    #[test]
    fn optional_sections_default() {
        let config = PlannerConfig::from_toml_str(MINIMAL_TOML).unwrap();

        assert_eq!(config.deduction_limits, DeductionLimits::default());
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn engine_uses_configured_limits() {
        let config = PlannerConfig::from_toml_str(FULL_TOML).unwrap();

        let engine = config.engine().unwrap();

        assert_eq!(
            engine.deduction_limits().student_loan_interest,
            Some(dec!(2500))
        );
    }

    #[test]
    fn rejects_table_without_unbounded_top() {
        let toml = r#"
[federal]
brackets = [{ upper_bound = "10000", rate = "0.10" }]

[state]
brackets = [{ rate = "0.05" }]
"#;

        let err = PlannerConfig::from_toml_str(toml).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidTable {
                table: "federal",
                source: BracketTableError::MissingUnboundedTop,
            }
        ));
    }

    #[test]
    fn rejects_combined_rate_above_one() {
        let toml = r#"
[federal]
brackets = [{ rate = "0.9" }]

[state]
brackets = [{ rate = "0.2" }]
"#;

        let err = PlannerConfig::from_toml_str(toml).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Engine(CalculationError::CombinedRateExceedsOne { .. })
        ));
    }

    #[test]
    fn missing_state_section_is_a_parse_error() {
        let toml = "[federal]\nbrackets = [{ rate = \"0.1\" }]\n";

        let err = PlannerConfig::from_toml_str(toml).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
