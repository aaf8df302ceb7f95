//! Nigerian personal income tax engine for the 2026 rules.
//!
//! Computes PAYE for salaried employees and income tax for independent
//! contractors from a validated [`RuleTable`], and compares the two.
//!
//! ```
//! use rust_decimal_macros::dec;
//! use taxready_core::{IncomeInput, PayeEngine, RuleTable};
//!
//! let rules = RuleTable::nigeria_2026().unwrap();
//! let result = PayeEngine::new(&rules)
//!     .compute_paye(&IncomeInput::salaried(dec!(1000000), dec!(500000)))
//!     .unwrap();
//!
//! assert_eq!(result.taxable_income, dec!(932600));
//! assert_eq!(result.total_tax, dec!(19890));
//! ```

pub mod calculations;
pub mod models;

pub use calculations::{
    ComparisonEngine, ComparisonResult, ComparisonScenario, ContractorAssessment, ContractorEngine,
    DeductionEngine, PayeEngine, ProgressiveTax, ProgressiveTaxCalculator, Recommendation,
    WithholdingCalculator, WithholdingResult,
};
pub use models::*;
