use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use planner_core::{BracketTable, BracketTableError, TaxBracket};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading bracket tables.
#[derive(Debug, Error)]
pub enum BracketLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid bracket table '{table}': {source}")]
    InvalidTable {
        table: String,
        #[source]
        source: BracketTableError,
    },

    #[error("bracket table '{0}' not found in CSV")]
    TableNotFound(String),
}

impl From<csv::Error> for BracketLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a bracket CSV file.
///
/// - `table`: optional table name (e.g. `federal`, `state`); rows without
///   one belong to the unnamed table
/// - `upper_bound`: upper end of the bracket (empty for unbounded)
/// - `rate`: marginal rate as a decimal (e.g. 0.22 for 22%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    #[serde(default)]
    pub table: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for bracket tables from CSV.
///
/// Rows keep file order within each table, so brackets must be listed
/// lowest first. Every table is validated before it is returned.
pub struct BracketTableLoader;

impl BracketTableLoader {
    /// Parse bracket records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Group records by table name and validate each table.
    ///
    /// Rows with no `table` value are grouped under the empty name `""`.
    pub fn into_tables(
        records: &[BracketRecord]
    ) -> Result<BTreeMap<String, BracketTable>, BracketLoaderError> {
        let mut groups: BTreeMap<String, Vec<TaxBracket>> = BTreeMap::new();

        for record in records {
            let name = record.table.clone().unwrap_or_default();
            groups.entry(name).or_default().push(TaxBracket {
                upper_bound: record.upper_bound,
                rate: record.rate,
            });
        }

        groups
            .into_iter()
            .map(|(name, brackets)| {
                let table = BracketTable::new(brackets).map_err(|source| {
                    BracketLoaderError::InvalidTable {
                        table: name.clone(),
                        source,
                    }
                })?;
                debug!(table = %name, brackets = table.brackets.len(), "loaded bracket table");
                Ok((name, table))
            })
            .collect()
    }

    /// Read a CSV file holding exactly one table (the `table` column may be
    /// omitted entirely).
    pub fn load_single(path: &Path) -> Result<BracketTable, BracketLoaderError> {
        let file = std::fs::File::open(path).map_err(|source| BracketLoaderError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let records = Self::parse(file)?;
        let brackets: Vec<TaxBracket> = records
            .into_iter()
            .map(|r| TaxBracket {
                upper_bound: r.upper_bound,
                rate: r.rate,
            })
            .collect();

        BracketTable::new(brackets).map_err(|source| BracketLoaderError::InvalidTable {
            table: path.display().to_string(),
            source,
        })
    }

    /// Pull one named table out of a multi-table CSV.
    pub fn take_table(
        tables: &mut BTreeMap<String, BracketTable>,
        name: &str,
    ) -> Result<BracketTable, BracketLoaderError> {
        tables
            .remove(name)
            .ok_or_else(|| BracketLoaderError::TableNotFound(name.to_string()))
    }
}
