//! Side-by-side PAYE versus contractor comparison on the same gross income.
//!
//! The employee side derives basic salary from an assumed ratio of gross;
//! the contractor side uses the declared business expenses. Both sides get
//! the same rent and life assurance figures.
//!
//! `net_difference` is contractor net minus PAYE net. A difference whose
//! magnitude is within the rule table's neutral zone is reported as
//! [`Recommendation::Comparable`] so a few naira of rounding never flips
//! the recommendation.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use taxready_core::{ComparisonEngine, Recommendation, RuleTable};
//!
//! let rules = RuleTable::nigeria_2026().unwrap();
//! let comparison = ComparisonEngine::new(&rules)
//!     .compare(dec!(1000000), dec!(0.5), dec!(0))
//!     .unwrap();
//!
//! assert_eq!(comparison.paye_result.net_income, dec!(940110));
//! assert_eq!(comparison.contractor_result.net_income, dec!(970000));
//! assert_eq!(comparison.net_difference, dec!(29890));
//! assert_eq!(comparison.recommendation, Recommendation::ContractorBetter);
//! ```

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::round_half_up;
use crate::calculations::contractor::ContractorEngine;
use crate::calculations::paye::PayeEngine;
use crate::models::{IncomeInput, RuleTable, TaxResult, ValidationError};

/// Which arrangement leaves more take-home pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    PayeBetter,
    ContractorBetter,
    Comparable,
}

impl Recommendation {
    /// Classifies a contractor-minus-PAYE net difference.
    ///
    /// Differences with `|net_difference| <= neutral_zone` are comparable.
    pub fn from_difference(
        net_difference: Decimal,
        neutral_zone: Decimal,
    ) -> Self {
        if net_difference.abs() <= neutral_zone {
            Self::Comparable
        } else if net_difference > Decimal::ZERO {
            Self::ContractorBetter
        } else {
            Self::PayeBetter
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PayeBetter => "paye_better",
            Self::ContractorBetter => "contractor_better",
            Self::Comparable => "comparable",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let text = match self {
            Self::PayeBetter => "PAYE employment leaves more take-home pay",
            Self::ContractorBetter => "Contracting leaves more take-home pay",
            Self::Comparable => "Both arrangements are comparable",
        };
        f.write_str(text)
    }
}

/// Inputs for a comparison with reliefs that apply to both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonScenario {
    pub gross_income: Decimal,
    /// Share of gross income treated as basic salary on the PAYE side.
    pub basic_salary_ratio: Decimal,
    pub declared_expenses: Decimal,
    pub annual_rent_paid: Decimal,
    pub life_assurance_premium: Decimal,
}

impl ComparisonScenario {
    pub fn new(
        gross_income: Decimal,
        basic_salary_ratio: Decimal,
        declared_expenses: Decimal,
    ) -> Self {
        Self {
            gross_income,
            basic_salary_ratio,
            declared_expenses,
            annual_rent_paid: Decimal::ZERO,
            life_assurance_premium: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub gross_income: Decimal,
    pub paye_result: TaxResult,
    pub contractor_result: TaxResult,
    /// Contractor net income minus PAYE net income.
    pub net_difference: Decimal,
    /// PAYE total tax minus contractor total tax.
    pub tax_difference: Decimal,
    pub neutral_zone: Decimal,
    pub recommendation: Recommendation,
}

/// Runs both engines over equivalent gross figures.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonEngine<'a> {
    rules: &'a RuleTable,
}

impl<'a> ComparisonEngine<'a> {
    pub fn new(rules: &'a RuleTable) -> Self {
        Self { rules }
    }

    /// Compares employment and contracting for `gross_income`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidBasicSalaryRatio`] when the ratio is
    /// outside `0..=1`, and any error either engine raises for its input.
    pub fn compare(
        &self,
        gross_income: Decimal,
        basic_salary_ratio: Decimal,
        declared_expenses: Decimal,
    ) -> Result<ComparisonResult, ValidationError> {
        self.compare_scenario(&ComparisonScenario::new(
            gross_income,
            basic_salary_ratio,
            declared_expenses,
        ))
    }

    /// Like [`compare`](Self::compare), with rent and life assurance applied
    /// identically to both sides.
    pub fn compare_scenario(
        &self,
        scenario: &ComparisonScenario,
    ) -> Result<ComparisonResult, ValidationError> {
        let ratio = scenario.basic_salary_ratio;
        if ratio < Decimal::ZERO || ratio > Decimal::ONE {
            return Err(ValidationError::InvalidBasicSalaryRatio(ratio));
        }

        // Rounding must not lift basic salary above a sub-kobo gross.
        let basic_salary = round_half_up(scenario.gross_income * ratio).min(scenario.gross_income);
        let paye_input = IncomeInput::salaried(scenario.gross_income, basic_salary)
            .with_rent_paid(scenario.annual_rent_paid)
            .with_life_assurance(scenario.life_assurance_premium);
        let contractor_input = IncomeInput::contract(scenario.gross_income, scenario.declared_expenses)
            .with_rent_paid(scenario.annual_rent_paid)
            .with_life_assurance(scenario.life_assurance_premium);

        let paye_result = PayeEngine::new(self.rules).compute_paye(&paye_input)?;
        let contractor_result =
            ContractorEngine::new(self.rules).compute_contractor_tax(&contractor_input)?;

        let neutral_zone = self.rules.thresholds().comparison_neutral_zone;
        let net_difference = contractor_result.net_income - paye_result.net_income;
        let tax_difference = paye_result.total_tax - contractor_result.total_tax;
        let recommendation = Recommendation::from_difference(net_difference, neutral_zone);

        debug!(
            %net_difference,
            %tax_difference,
            recommendation = recommendation.as_str(),
            "comparison complete"
        );

        Ok(ComparisonResult {
            gross_income: paye_result.gross_income,
            paye_result,
            contractor_result,
            net_difference,
            tax_difference,
            neutral_zone,
            recommendation,
        })
    }
}
