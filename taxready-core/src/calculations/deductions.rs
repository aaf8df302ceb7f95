//! Statutory deductions and personal reliefs.
//!
//! Each operation turns one raw income figure into a non-negative deduction
//! using the rate and cap of the matching [`DeductionRule`](crate::DeductionRule). Inputs of zero
//! or less produce a zero deduction; rejecting negative raw inputs is the
//! job of [`IncomeInput::validate`](crate::IncomeInput::validate).
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use taxready_core::{DeductionEngine, RuleTable};
//!
//! let rules = RuleTable::nigeria_2026().unwrap();
//! let engine = DeductionEngine::new(&rules);
//!
//! assert_eq!(engine.compute_pension(dec!(500000)), dec!(40000));
//! assert_eq!(engine.compute_nhf(dec!(500000)), dec!(2400));
//! // Relief never exceeds the rent actually paid.
//! assert_eq!(engine.compute_rent_relief(dec!(100000), dec!(10000000)), dec!(100000));
//! ```

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::common::{floor_at_zero, round_half_up};
use crate::models::{DeductionKind, DeductionLine, DeductionRules, RuleTable};

/// Computes individual deductions from the rules of one tax year.
#[derive(Debug, Clone, Copy)]
pub struct DeductionEngine<'a> {
    rules: &'a DeductionRules,
}

impl<'a> DeductionEngine<'a> {
    pub fn new(rules: &'a RuleTable) -> Self {
        Self {
            rules: rules.deductions(),
        }
    }

    /// Employee pension: 8% of pensionable earnings, uncapped.
    pub fn compute_pension(
        &self,
        pensionable_earnings: Decimal,
    ) -> Decimal {
        self.rules.pension.apply(pensionable_earnings)
    }

    /// National Housing Fund: 2.5% of basic salary up to the annual ceiling.
    pub fn compute_nhf(
        &self,
        basic_salary: Decimal,
    ) -> Decimal {
        self.rules.nhf.apply(basic_salary)
    }

    /// National Health Insurance Scheme: 5% of basic salary, uncapped.
    pub fn compute_nhis(
        &self,
        basic_salary: Decimal,
    ) -> Decimal {
        self.rules.nhis.apply(basic_salary)
    }

    /// Rent relief: the smallest of 20% of gross income, the cap, and the
    /// rent actually paid.
    pub fn compute_rent_relief(
        &self,
        annual_rent_paid: Decimal,
        gross_income: Decimal,
    ) -> Decimal {
        if annual_rent_paid <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.rules
            .rent_relief
            .apply(gross_income)
            .min(round_half_up(annual_rent_paid))
    }

    /// Life assurance relief: the premium paid, up to the cap.
    pub fn compute_life_assurance_relief(
        &self,
        premium: Decimal,
    ) -> Decimal {
        self.rules.life_assurance.apply(premium)
    }

    /// Voluntary pension relief for contractors: the contribution made, up to
    /// 8% of gross income.
    pub fn compute_voluntary_pension_relief(
        &self,
        contribution: Decimal,
        gross_income: Decimal,
    ) -> Decimal {
        if contribution <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let ceiling = self.rules.voluntary_pension.apply(gross_income);
        let relief = round_half_up(contribution).min(ceiling);
        if relief < contribution {
            warn!(%contribution, %relief, "voluntary pension relief capped");
        }
        relief
    }

    /// Builds a statement line, labelled from the rule table when the kind
    /// has a rule.
    pub fn line(
        &self,
        kind: DeductionKind,
        amount: Decimal,
    ) -> DeductionLine {
        let name = self
            .rules
            .get(kind)
            .map(|rule| rule.name.clone())
            .unwrap_or_else(|| kind.default_name().to_string());
        DeductionLine { kind, name, amount }
    }
}

/// Sums a statement's lines.
pub fn total_deductions(lines: &[DeductionLine]) -> Decimal {
    round_half_up(lines.iter().map(|line| line.amount).sum())
}

/// `max(0, gross - deductions)`, rounded to kobo.
pub fn taxable_income(
    gross_income: Decimal,
    total_deductions: Decimal,
) -> Decimal {
    let taxable = round_half_up(gross_income - total_deductions);
    if taxable < Decimal::ZERO {
        warn!(%gross_income, %total_deductions, "deductions exceed income; taxable income floored at zero");
    }
    floor_at_zero(taxable)
}
