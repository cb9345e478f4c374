use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use planner_cli::defaults::sample_profile;
use planner_cli::logging;
use planner_cli::report::{JsonReport, TaxReport};
use planner_cli::session::PlannerSession;
use planner_core::{BracketTable, TaxCalculation, TaxEngine, UserData};
use planner_data::{BracketTableLoader, HouseholdProfile, PlannerConfig, profile};
use tracing::{debug, info};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Household income tax calculator.
///
/// Federal and state bracket tables come from a TOML config, from CSV files,
/// or both (CSV wins). Households come from a profile CSV, the built-in
/// sample household, or an all-zero household adjusted with `--set`.
#[derive(Debug, Parser)]
#[command(name = "tax-planner")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Planner configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Federal bracket table CSV (`upper_bound,rate`)
    #[arg(long)]
    federal_brackets: Option<PathBuf>,

    /// State bracket table CSV (`upper_bound,rate`)
    #[arg(long)]
    state_brackets: Option<PathBuf>,

    /// Household profile CSV, one household per row
    #[arg(short, long, conflicts_with = "sample")]
    profile: Option<PathBuf>,

    /// Start from the built-in sample household
    #[arg(long, default_value_t = false)]
    sample: bool,

    /// Override one field on every household, e.g. `income.salary=82,500`
    #[arg(long = "set", value_name = "FIELD=AMOUNT")]
    overrides: Vec<String>,

    /// Print JSON instead of the text report
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Log level or EnvFilter directive (overrides the config)
    #[arg(long)]
    log_level: Option<String>,

    /// Append log output to this file (overrides the config)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Keep console logging off; file logging is unaffected
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

// ─── inputs ──────────────────────────────────────────────────────────────────

fn load_table(
    csv: Option<&Path>,
    from_config: Option<&BracketTable>,
    which: &str,
) -> Result<BracketTable> {
    match (csv, from_config) {
        (Some(path), _) => BracketTableLoader::load_single(path)
            .with_context(|| format!("Failed to load {which} brackets: {}", path.display())),
        (None, Some(table)) => Ok(table.clone()),
        (None, None) => bail!("no {which} bracket table: pass --{which}-brackets or --config"),
    }
}

fn load_households(cli: &Cli) -> Result<Vec<HouseholdProfile>> {
    if let Some(path) = &cli.profile {
        let households = profile::load_from_file(path)
            .with_context(|| format!("Failed to load profile: {}", path.display()))?;
        if households.is_empty() {
            bail!("profile {} has no households", path.display());
        }
        info!(count = households.len(), "loaded households");
        return Ok(households);
    }

    let data = if cli.sample {
        sample_profile()
    } else {
        UserData::default()
    };
    Ok(vec![HouseholdProfile { label: None, data }])
}

fn parse_override(raw: &str) -> Result<(&str, &str)> {
    raw.split_once('=')
        .map(|(field, amount)| (field.trim(), amount))
        .with_context(|| format!("--set expects FIELD=AMOUNT, got '{raw}'"))
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    logging::init_logging();

    let cli = Cli::parse();

    let config = cli
        .config
        .as_deref()
        .map(|path| {
            PlannerConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))
        })
        .transpose()?;

    let log_config = config.as_ref().map(|c| c.logging.clone()).unwrap_or_default();
    if let Some(level) = cli.log_level.as_deref().or(log_config.level.as_deref()) {
        logging::set_log_level(level)?;
    }
    if let Some(path) = cli.log_file.as_deref().or(log_config.file.as_deref()) {
        logging::enable_file_logging(path)?;
    }
    if cli.quiet {
        logging::set_console_enabled(false)?;
    }

    let federal = load_table(
        cli.federal_brackets.as_deref(),
        config.as_ref().map(|c| &c.federal),
        "federal",
    )?;
    let state = load_table(
        cli.state_brackets.as_deref(),
        config.as_ref().map(|c| &c.state),
        "state",
    )?;
    let limits = config
        .as_ref()
        .map(|c| c.deduction_limits.clone())
        .unwrap_or_default();

    let engine = TaxEngine::new(&federal, &state)
        .and_then(|engine| engine.with_deduction_limits(limits))
        .context("Invalid tax tables")?;

    let overrides = cli
        .overrides
        .iter()
        .map(|raw| parse_override(raw))
        .collect::<Result<Vec<_>>>()?;

    let mut results: Vec<(Option<String>, TaxCalculation)> = Vec::new();
    for household in load_households(&cli)? {
        let name = household.label.as_deref().unwrap_or("household").to_string();
        let mut session = PlannerSession::new(household.data);
        for (field, amount) in &overrides {
            session.set_amount(field, amount)?;
        }

        debug!(household = %name, "calculating");
        let calculation = session
            .calculate(&engine)
            .with_context(|| format!("Failed to calculate taxes for {name}"))?
            .clone();
        results.push((household.label, calculation));
    }

    if cli.json {
        let reports: Vec<JsonReport<'_>> = results
            .iter()
            .map(|(label, calc)| TaxReport::new(calc).with_label(label.as_deref()).into())
            .collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for (i, (label, calc)) in results.iter().enumerate() {
            if i > 0 {
                println!();
            }
            print!("{}", TaxReport::new(calc).with_label(label.as_deref()));
        }
    }

    Ok(())
}
