mod deduction;
mod income_input;
mod payment_type;
mod rule_table;
mod tax_band;
mod tax_result;

pub use deduction::{DeductionBasis, DeductionKind, DeductionRule, DeductionRules};
pub use income_input::{Contributions, IncomeInput, MAX_AMOUNT, Regime, ValidationError};
pub use payment_type::PaymentType;
pub use rule_table::{ConfigurationError, RuleTable, TaxYearConfig, Thresholds, WithholdingRates};
pub use tax_band::TaxBand;
pub use tax_result::{BandTax, DeductionLine, TaxResult};
