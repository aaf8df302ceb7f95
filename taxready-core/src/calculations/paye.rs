//! Pay-As-You-Earn for salaried employees.
//!
//! # Pipeline
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Pension: 8% of basic + housing + transport |
//! | 2    | NHF: 2.5% of basic, capped |
//! | 3    | NHIS: 5% of basic |
//! | 4    | Rent relief: min(20% of gross, cap, rent paid) |
//! | 5    | Life assurance: premium, capped |
//! | 6    | Mortgage interest: as declared |
//! | 7    | Taxable income: max(0, gross - steps 1-6) |
//! | 8    | Tax: progressive bands on step 7 |
//! | 9    | Net income: gross - tax - pension |
//!
//! Steps 1-3 can be switched off per employee through
//! [`Contributions`](crate::Contributions).
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use taxready_core::{IncomeInput, PayeEngine, RuleTable};
//!
//! let rules = RuleTable::nigeria_2026().unwrap();
//! let input = IncomeInput::salaried(dec!(1000000), dec!(500000));
//!
//! let result = PayeEngine::new(&rules).compute_paye(&input).unwrap();
//!
//! assert_eq!(result.total_deductions, dec!(67400));
//! assert_eq!(result.total_tax, dec!(19890));
//! assert_eq!(result.net_income, dec!(940110));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::round_half_up;
use crate::calculations::deductions::DeductionEngine;
use crate::calculations::statement;
use crate::models::{DeductionKind, DeductionLine, IncomeInput, Regime, RuleTable, TaxResult, ValidationError};

/// Computes PAYE from a [`RuleTable`].
#[derive(Debug, Clone, Copy)]
pub struct PayeEngine<'a> {
    rules: &'a RuleTable,
}

impl<'a> PayeEngine<'a> {
    pub fn new(rules: &'a RuleTable) -> Self {
        Self { rules }
    }

    /// Computes PAYE for one employee.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if any amount is negative, or if the basic
    /// salary (or basic plus allowances) exceeds gross annual income.
    pub fn compute_paye(
        &self,
        input: &IncomeInput,
    ) -> Result<TaxResult, ValidationError> {
        input.validate_salaried()?;

        let gross_income = round_half_up(input.gross_annual_income);
        let deductions = self.itemize(input, gross_income);
        let pension = deductions
            .iter()
            .find(|line| line.kind == DeductionKind::Pension)
            .map_or(Decimal::ZERO, |line| line.amount);

        debug!(%gross_income, lines = deductions.len(), "PAYE deductions itemized");

        Ok(statement::assemble(
            self.rules,
            Regime::Paye,
            gross_income,
            deductions,
            pension,
        ))
    }

    /// Builds the deduction statement. Statutory lines that are switched on
    /// and rent relief are always listed; optional reliefs only when non-zero.
    fn itemize(
        &self,
        input: &IncomeInput,
        gross_income: Decimal,
    ) -> Vec<DeductionLine> {
        let engine = DeductionEngine::new(self.rules);
        let mut lines = Vec::with_capacity(6);

        if input.contributions.pension {
            let pension = engine.compute_pension(input.pensionable_earnings());
            lines.push(engine.line(DeductionKind::Pension, pension));
        }
        if input.contributions.nhf {
            let nhf = engine.compute_nhf(input.basic_salary);
            lines.push(engine.line(DeductionKind::Nhf, nhf));
        }
        if input.contributions.nhis {
            let nhis = engine.compute_nhis(input.basic_salary);
            lines.push(engine.line(DeductionKind::Nhis, nhis));
        }

        let rent_relief = engine.compute_rent_relief(input.annual_rent_paid, gross_income);
        lines.push(engine.line(DeductionKind::RentRelief, rent_relief));

        let life_assurance = engine.compute_life_assurance_relief(input.life_assurance_premium);
        if life_assurance > Decimal::ZERO {
            lines.push(engine.line(DeductionKind::LifeAssurance, life_assurance));
        }

        let mortgage_interest = round_half_up(input.mortgage_interest);
        if mortgage_interest > Decimal::ZERO {
            lines.push(engine.line(DeductionKind::MortgageInterest, mortgage_interest));
        }

        lines
    }
}
