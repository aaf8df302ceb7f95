use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A contiguous income range taxed at a single marginal rate.
///
/// Bands are half-open on the left: income exactly equal to `upper_bound`
/// belongs to this band, income one kobo above it falls into the next one.
/// The top band has no upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBand {
    pub lower_bound: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
    #[serde(default)]
    pub label: String,
}

impl TaxBand {
    /// Portion of `taxable_income` that falls inside this band.
    ///
    /// `max(0, min(income, upper) - lower)`; an unbounded band takes
    /// everything above its lower bound.
    pub fn amount_in_band(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        let ceiling = match self.upper_bound {
            Some(upper) => taxable_income.min(upper),
            None => taxable_income,
        };
        (ceiling - self.lower_bound).max(Decimal::ZERO)
    }
}
