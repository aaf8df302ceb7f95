//! Calculation engines for PAYE, contractor income tax, and withholding.
//!
//! Every engine borrows a validated [`RuleTable`](crate::RuleTable) and holds
//! no other state, so the same input always produces the same result.

pub mod common;
pub mod comparison;
pub mod contractor;
pub mod deductions;
pub mod paye;
pub mod progressive;
mod statement;
pub mod withholding;

pub use comparison::{ComparisonEngine, ComparisonResult, ComparisonScenario, Recommendation};
pub use contractor::{ContractorAssessment, ContractorEngine};
pub use deductions::DeductionEngine;
pub use paye::PayeEngine;
pub use progressive::{ProgressiveTax, ProgressiveTaxCalculator};
pub use withholding::{WithholdingCalculator, WithholdingResult};
