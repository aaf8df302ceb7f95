use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{DeductionKind, Regime, TaxBand};

/// One line of the itemized deduction statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLine {
    pub kind: DeductionKind,
    pub name: String,
    pub amount: Decimal,
}

/// Tax attributed to a single band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandTax {
    pub band: TaxBand,
    pub taxable_amount_in_band: Decimal,
    pub tax_amount: Decimal,
}

/// The outcome of one PAYE or contractor calculation.
///
/// Field names and the ordering of `tax_per_band` (ascending, every band
/// present) are serialized verbatim by exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub regime: Regime,
    pub gross_income: Decimal,
    pub deductions: Vec<DeductionLine>,
    pub total_deductions: Decimal,
    pub taxable_income: Decimal,
    pub tax_per_band: Vec<BandTax>,
    pub total_tax: Decimal,
    pub net_income: Decimal,
    /// Total tax as a percentage of gross income.
    pub effective_rate: Decimal,
    /// Band rate applying to the last naira of taxable income.
    pub marginal_rate: Decimal,
    pub monthly_tax: Decimal,
    pub net_monthly_income: Decimal,
}

impl TaxResult {
    /// Amount of the first deduction line of `kind`, or zero when absent.
    pub fn deduction(
        &self,
        kind: DeductionKind,
    ) -> Decimal {
        self.deductions
            .iter()
            .find(|line| line.kind == kind)
            .map_or(Decimal::ZERO, |line| line.amount)
    }
}
