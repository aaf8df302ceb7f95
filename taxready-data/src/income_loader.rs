//! CSV loader for batches of income figures.
//!
//! ## CSV Format
//!
//! Columns are matched by header name, so order does not matter. Amount
//! cells accept plain numbers or naira notation (`₦1,200,000`); an empty
//! cell or a missing optional column counts as zero.
//!
//! | Column | Required | Notes |
//! |------------------------------|----------|-------------------------------------|
//! | `label` | yes | Free text shown in reports |
//! | `regime` | yes | `paye` / `employee` or `contractor` |
//! | `gross_annual_income` | yes | |
//! | `basic_salary` | no | PAYE |
//! | `housing_allowance` | no | PAYE |
//! | `transport_allowance` | no | PAYE |
//! | `annual_rent_paid` | no | Both regimes |
//! | `life_assurance_premium` | no | Both regimes |
//! | `mortgage_interest` | no | PAYE |
//! | `other_allowable_expenses` | no | Contractor |
//! | `voluntary_pension` | no | Contractor |
//! | `wht_credits` | no | Contractor |
//!
//! ### Example
//!
//! ```csv
//! label,regime,gross_annual_income,basic_salary,other_allowable_expenses
//! Ada,paye,"₦1,000,000",500000,
//! Bayo,contractor,6000000,,1000000
//! ```

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use taxready_core::{IncomeInput, Regime};
use thiserror::Error;
use tracing::debug;

use crate::money::parse_naira;

/// Serde-compatible row that mirrors the CSV layout.
#[derive(Debug, Deserialize)]
struct CsvRow {
    label: String,
    regime: String,
    #[serde(deserialize_with = "naira")]
    gross_annual_income: Decimal,
    #[serde(default, deserialize_with = "naira")]
    basic_salary: Decimal,
    #[serde(default, deserialize_with = "naira")]
    housing_allowance: Decimal,
    #[serde(default, deserialize_with = "naira")]
    transport_allowance: Decimal,
    #[serde(default, deserialize_with = "naira")]
    annual_rent_paid: Decimal,
    #[serde(default, deserialize_with = "naira")]
    life_assurance_premium: Decimal,
    #[serde(default, deserialize_with = "naira")]
    mortgage_interest: Decimal,
    #[serde(default, deserialize_with = "naira")]
    other_allowable_expenses: Decimal,
    #[serde(default, deserialize_with = "naira")]
    voluntary_pension: Decimal,
    #[serde(default, deserialize_with = "naira")]
    wht_credits: Decimal,
}

fn naira<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) => parse_naira(&s).map_err(serde::de::Error::custom),
        None => Ok(Decimal::ZERO),
    }
}

/// Errors that can occur while loading income figures.
#[derive(Debug, Error)]
pub enum IncomeLoadError {
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bad structure, a missing required column, or an unparseable amount.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// `row` is 1-based, counting data rows only.
    #[error("unrecognised regime '{regime}' on row {row}")]
    UnknownRegime { regime: String, row: usize },
}

/// One row of a batch: the figures plus how to tax them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelledInput {
    pub label: String,
    pub regime: Regime,
    pub input: IncomeInput,
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<LabelledInput, IncomeLoadError> {
    let regime = Regime::parse(&row.regime).ok_or_else(|| IncomeLoadError::UnknownRegime {
        regime: row.regime.clone(),
        row: row_number,
    })?;

    Ok(LabelledInput {
        label: row.label,
        regime,
        input: IncomeInput {
            gross_annual_income: row.gross_annual_income,
            basic_salary: row.basic_salary,
            housing_allowance: row.housing_allowance,
            transport_allowance: row.transport_allowance,
            mortgage_interest: row.mortgage_interest,
            annual_rent_paid: row.annual_rent_paid,
            life_assurance_premium: row.life_assurance_premium,
            other_allowable_expenses: row.other_allowable_expenses,
            voluntary_pension: row.voluntary_pension,
            wht_credits: row.wht_credits,
            ..IncomeInput::default()
        },
    })
}

/// Parses CSV text into labelled inputs, in file order.
///
/// # Errors
///
/// * [`IncomeLoadError::Parse`] if the CSV is structurally invalid or a
///   cell cannot be read as an amount.
/// * [`IncomeLoadError::UnknownRegime`] if a row names neither regime.
pub fn load_from_str(input: &str) -> Result<Vec<LabelledInput>, IncomeLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    let rows = reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| convert_row(result?, idx + 1))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(rows = rows.len(), "income rows loaded");
    Ok(rows)
}

/// Reads a file from disk and delegates to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<LabelledInput>, IncomeLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| IncomeLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}
