//! Runs a loaded income batch through the engine for each row's regime.
//!
//! A row that fails validation does not stop the batch. It is kept in the
//! output as [`BatchOutcome::Skipped`] with the error text, so reports show
//! every input row.

use serde::Serialize;
use taxready_core::{ContractorEngine, PayeEngine, Regime, RuleTable, TaxResult};
use tracing::{debug, warn};

use crate::income_loader::LabelledInput;

/// What happened to one batch row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    Computed { result: TaxResult },
    Skipped { error: String },
}

/// One batch row with its outcome, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchEntry {
    pub label: String,
    pub regime: Regime,
    #[serde(flatten)]
    pub outcome: BatchOutcome,
}

impl BatchEntry {
    pub fn result(&self) -> Option<&TaxResult> {
        match &self.outcome {
            BatchOutcome::Computed { result } => Some(result),
            BatchOutcome::Skipped { .. } => None,
        }
    }

    pub fn skipped_reason(&self) -> Option<&str> {
        match &self.outcome {
            BatchOutcome::Computed { .. } => None,
            BatchOutcome::Skipped { error } => Some(error.as_str()),
        }
    }
}

/// Computes every row, keeping failed rows as skipped entries.
pub fn run(
    rules: &RuleTable,
    rows: Vec<LabelledInput>,
) -> Vec<BatchEntry> {
    let paye = PayeEngine::new(rules);
    let contractor = ContractorEngine::new(rules);

    let entries: Vec<BatchEntry> = rows
        .into_iter()
        .map(|row| {
            let computed = match row.regime {
                Regime::Paye => paye.compute_paye(&row.input),
                Regime::Contractor => contractor.compute_contractor_tax(&row.input),
            };
            let outcome = match computed {
                Ok(result) => BatchOutcome::Computed { result },
                Err(error) => {
                    warn!(label = %row.label, %error, "row skipped");
                    BatchOutcome::Skipped {
                        error: error.to_string(),
                    }
                }
            };
            BatchEntry {
                label: row.label,
                regime: row.regime,
                outcome,
            }
        })
        .collect();

    debug!(
        rows = entries.len(),
        skipped = entries.iter().filter(|e| e.result().is_none()).count(),
        "batch computed"
    );
    entries
}
