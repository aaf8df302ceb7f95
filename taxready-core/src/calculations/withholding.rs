//! Withholding tax deducted at source from payments to contractors.
//!
//! ```
//! use rust_decimal_macros::dec;
//! use taxready_core::{PaymentType, RuleTable, WithholdingCalculator};
//!
//! let rules = RuleTable::nigeria_2026().unwrap();
//! let wht = WithholdingCalculator::new(&rules)
//!     .compute(dec!(500000), PaymentType::Consultancy)
//!     .unwrap();
//!
//! assert_eq!(wht.wht_amount, dec!(50000));
//! assert_eq!(wht.net_payment, dec!(450000));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::round_half_up;
use crate::models::{PaymentType, RuleTable, ValidationError, WithholdingRates};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingResult {
    pub payment_type: PaymentType,
    pub gross_amount: Decimal,
    pub rate: Decimal,
    pub wht_amount: Decimal,
    /// What the payee actually receives.
    pub net_payment: Decimal,
}

#[derive(Debug, Clone, Copy)]
pub struct WithholdingCalculator<'a> {
    rates: &'a WithholdingRates,
}

impl<'a> WithholdingCalculator<'a> {
    pub fn new(rules: &'a RuleTable) -> Self {
        Self {
            rates: rules.withholding(),
        }
    }

    /// Computes the tax withheld from one payment.
    ///
    /// Payment types missing from the rule table use its default rate.
    pub fn compute(
        &self,
        gross_amount: Decimal,
        payment_type: PaymentType,
    ) -> Result<WithholdingResult, ValidationError> {
        if gross_amount < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount {
                field: "payment amount",
                value: gross_amount,
            });
        }

        let gross_amount = round_half_up(gross_amount);
        let rate = self.rates.rate_for(payment_type);
        let wht_amount = round_half_up(gross_amount * rate);

        debug!(payment_type = payment_type.as_str(), %gross_amount, %rate, %wht_amount, "withholding computed");

        Ok(WithholdingResult {
            payment_type,
            gross_amount,
            rate,
            wht_amount,
            net_payment: gross_amount - wht_amount,
        })
    }
}
