//! Marginal-rate tax over an ordered band table.
//!
//! The calculator walks every band in ascending order. The amount of taxable
//! income inside a band is `max(0, min(income, upper) - lower)` and the band
//! contributes that amount times its rate. Bands the income never reaches
//! are still reported, with zero amounts, so the breakdown always has one
//! entry per band.
//!
//! Each band's tax is rounded to kobo on its own and the total is the sum of
//! the rounded figures, so the breakdown always adds up to the total.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use taxready_core::{ProgressiveTaxCalculator, RuleTable};
//!
//! let rules = RuleTable::nigeria_2026().unwrap();
//! let calculator = ProgressiveTaxCalculator::new(rules.bands());
//!
//! let tax = calculator.compute_tax(dec!(3000000));
//!
//! // 0% on the first ₦800,000, 15% on the next ₦2,200,000.
//! assert_eq!(tax.total_tax, dec!(330000));
//! assert_eq!(tax.per_band.len(), 6);
//! assert_eq!(tax.per_band[2].taxable_amount_in_band, dec!(0));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{floor_at_zero, round_half_up};
use crate::models::{BandTax, TaxBand};

/// Total tax and its per-band breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressiveTax {
    pub per_band: Vec<BandTax>,
    pub total_tax: Decimal,
}

/// Applies a band table to taxable income.
///
/// The bands are expected to come from a validated
/// [`RuleTable`](crate::RuleTable): contiguous, ascending, last unbounded.
#[derive(Debug, Clone, Copy)]
pub struct ProgressiveTaxCalculator<'a> {
    bands: &'a [TaxBand],
}

impl<'a> ProgressiveTaxCalculator<'a> {
    pub fn new(bands: &'a [TaxBand]) -> Self {
        Self { bands }
    }

    /// Computes the tax on `taxable_income`.
    ///
    /// Negative income is treated as zero.
    pub fn compute_tax(
        &self,
        taxable_income: Decimal,
    ) -> ProgressiveTax {
        let taxable_income = floor_at_zero(taxable_income);

        let per_band: Vec<BandTax> = self
            .bands
            .iter()
            .map(|band| {
                let taxable_amount_in_band = band.amount_in_band(taxable_income);
                BandTax {
                    band: band.clone(),
                    taxable_amount_in_band,
                    tax_amount: round_half_up(taxable_amount_in_band * band.rate),
                }
            })
            .collect();

        let total_tax = per_band.iter().map(|b| b.tax_amount).sum();

        debug!(%taxable_income, %total_tax, "progressive tax computed");

        ProgressiveTax {
            per_band,
            total_tax,
        }
    }

    /// The marginal rate applying to the last naira of `taxable_income`.
    ///
    /// Income exactly on a band's upper bound takes that band's rate.
    pub fn marginal_rate(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        self.bands
            .iter()
            .find(|band| match band.upper_bound {
                Some(upper) => taxable_income <= upper,
                None => true,
            })
            .map_or(Decimal::ZERO, |band| band.rate)
    }
}
