//! Income tax for independent contractors and self-employed professionals.
//!
//! Contractors do not pay pension, NHF or NHIS through an employer. Instead
//! they deduct allowable business expenses, which may not exceed gross
//! contract income. Rent relief and life assurance relief apply exactly as
//! for PAYE, and a voluntary pension contribution is relieved up to 8% of
//! gross income.
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Business expenses: as declared, at most gross |
//! | 2    | Rent relief: min(20% of gross, cap, rent paid) |
//! | 3    | Life assurance: premium, capped |
//! | 4    | Voluntary pension: contribution, at most 8% of gross |
//! | 5    | Taxable income: max(0, gross - steps 1-4) |
//! | 6    | Tax: progressive bands on step 5 |
//! | 7    | Net income: gross - tax - step 4 |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use taxready_core::{ContractorEngine, IncomeInput, RuleTable};
//!
//! let rules = RuleTable::nigeria_2026().unwrap();
//! let input = IncomeInput::contract(dec!(6000000), dec!(1000000));
//!
//! let result = ContractorEngine::new(&rules).compute_contractor_tax(&input).unwrap();
//!
//! assert_eq!(result.taxable_income, dec!(5000000));
//! assert_eq!(result.total_tax, dec!(690000));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{floor_at_zero, percentage_of, round_half_up};
use crate::calculations::deductions::DeductionEngine;
use crate::calculations::statement;
use crate::models::{DeductionKind, DeductionLine, IncomeInput, Regime, RuleTable, TaxResult, ValidationError};

/// A contractor's tax result plus the business figures around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractorAssessment {
    pub result: TaxResult,
    /// Gross contract income less business expenses.
    pub gross_profit: Decimal,
    /// Gross profit as a percentage of gross income.
    pub profit_margin: Decimal,
    /// Withholding tax already deducted by clients.
    pub wht_credits: Decimal,
    /// Tax still owed after WHT credits.
    pub net_tax_payable: Decimal,
    /// WHT credits in excess of the tax due.
    pub wht_refund: Decimal,
    pub vat_registration_required: bool,
    pub qualifies_small_company: bool,
}

/// Computes contractor income tax from a [`RuleTable`].
#[derive(Debug, Clone, Copy)]
pub struct ContractorEngine<'a> {
    rules: &'a RuleTable,
}

impl<'a> ContractorEngine<'a> {
    pub fn new(rules: &'a RuleTable) -> Self {
        Self { rules }
    }

    /// Computes the tax on gross contract income.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if any amount is negative or if declared
    /// business expenses exceed gross income.
    pub fn compute_contractor_tax(
        &self,
        input: &IncomeInput,
    ) -> Result<TaxResult, ValidationError> {
        input.validate_contract()?;

        let gross_income = round_half_up(input.gross_annual_income);
        let deductions = self.itemize(input, gross_income);
        let voluntary_pension = deductions
            .iter()
            .find(|line| line.kind == DeductionKind::VoluntaryPension)
            .map_or(Decimal::ZERO, |line| line.amount);

        debug!(%gross_income, lines = deductions.len(), "contractor deductions itemized");

        Ok(statement::assemble(
            self.rules,
            Regime::Contractor,
            gross_income,
            deductions,
            voluntary_pension,
        ))
    }

    /// Computes the tax and then settles it against WHT credits and the
    /// business thresholds of the rule table.
    pub fn assess(
        &self,
        input: &IncomeInput,
    ) -> Result<ContractorAssessment, ValidationError> {
        let result = self.compute_contractor_tax(input)?;
        let thresholds = self.rules.thresholds();

        let gross_profit = round_half_up(result.gross_income - input.other_allowable_expenses);
        let wht_credits = round_half_up(input.wht_credits);

        Ok(ContractorAssessment {
            gross_profit,
            profit_margin: percentage_of(gross_profit, result.gross_income),
            wht_credits,
            net_tax_payable: floor_at_zero(result.total_tax - wht_credits),
            wht_refund: floor_at_zero(wht_credits - result.total_tax),
            vat_registration_required: result.gross_income > thresholds.vat_registration,
            qualifies_small_company: result.gross_income <= thresholds.small_company_turnover,
            result,
        })
    }

    fn itemize(
        &self,
        input: &IncomeInput,
        gross_income: Decimal,
    ) -> Vec<DeductionLine> {
        let engine = DeductionEngine::new(self.rules);
        let mut lines = Vec::with_capacity(4);

        let expenses = round_half_up(input.other_allowable_expenses);
        if expenses > Decimal::ZERO {
            lines.push(engine.line(DeductionKind::BusinessExpenses, expenses));
        }

        let rent_relief = engine.compute_rent_relief(input.annual_rent_paid, gross_income);
        lines.push(engine.line(DeductionKind::RentRelief, rent_relief));

        let life_assurance = engine.compute_life_assurance_relief(input.life_assurance_premium);
        if life_assurance > Decimal::ZERO {
            lines.push(engine.line(DeductionKind::LifeAssurance, life_assurance));
        }

        let voluntary_pension =
            engine.compute_voluntary_pension_relief(input.voluntary_pension, gross_income);
        if voluntary_pension > Decimal::ZERO {
            lines.push(engine.line(DeductionKind::VoluntaryPension, voluntary_pension));
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn rules() -> RuleTable {
        RuleTable::nigeria_2026().expect("built-in rule table")
    }

    // =========================================================================
    // compute_contractor_tax tests
    // =========================================================================

    #[test]
    fn expenses_reduce_taxable_income() {
        let rules = rules();
        let input = IncomeInput::contract(dec!(6000000), dec!(1000000));

        let result = ContractorEngine::new(&rules).compute_contractor_tax(&input).unwrap();

        assert_eq!(result.deduction(DeductionKind::BusinessExpenses), dec!(1000000));
        assert_eq!(result.taxable_income, dec!(5000000));
        // 330,000 + 18% × 2,000,000
        assert_eq!(result.total_tax, dec!(690000));
        assert_eq!(result.net_income, dec!(5310000));
        assert_eq!(result.effective_rate, dec!(11.50));
        assert_eq!(result.regime, Regime::Contractor);
    }

    #[test]
    fn no_statutory_employee_deductions() {
        let rules = rules();
        let input = IncomeInput {
            basic_salary: dec!(500000),
            ..IncomeInput::contract(dec!(1000000), Decimal::ZERO)
        };

        let result = ContractorEngine::new(&rules).compute_contractor_tax(&input).unwrap();

        assert_eq!(result.deduction(DeductionKind::Pension), Decimal::ZERO);
        assert_eq!(result.deduction(DeductionKind::Nhf), Decimal::ZERO);
        assert_eq!(result.deduction(DeductionKind::Nhis), Decimal::ZERO);
        assert_eq!(
            result.deductions.iter().map(|l| l.kind).collect::<Vec<_>>(),
            vec![DeductionKind::RentRelief]
        );
        assert_eq!(result.total_tax, dec!(30000));
        assert_eq!(result.net_income, dec!(970000));
    }

    #[test]
    fn rent_and_life_assurance_apply_as_for_paye() {
        let rules = rules();
        let input = IncomeInput::contract(dec!(4000000), dec!(500000))
            .with_rent_paid(dec!(300000))
            .with_life_assurance(dec!(150000));

        let result = ContractorEngine::new(&rules).compute_contractor_tax(&input).unwrap();

        assert_eq!(result.deduction(DeductionKind::RentRelief), dec!(300000));
        assert_eq!(result.deduction(DeductionKind::LifeAssurance), dec!(100000));
        assert_eq!(result.total_deductions, dec!(900000));
        assert_eq!(result.taxable_income, dec!(3100000));
        // 330,000 + 18% × 100,000
        assert_eq!(result.total_tax, dec!(348000));
    }

    #[test]
    fn voluntary_pension_is_relieved_up_to_eight_percent() {
        let rules = rules();
        let input = IncomeInput {
            voluntary_pension: dec!(600000),
            ..IncomeInput::contract(dec!(6000000), dec!(1000000))
        };

        let result = ContractorEngine::new(&rules).compute_contractor_tax(&input).unwrap();

        assert_eq!(result.deduction(DeductionKind::VoluntaryPension), dec!(480000));
        assert_eq!(result.taxable_income, dec!(4520000));
        assert_eq!(result.total_tax, dec!(603600));
        // relieved contribution leaves take-home pay like a PAYE pension
        assert_eq!(result.net_income, dec!(4916400));
    }

    #[test]
    fn expenses_equal_to_gross_leave_nothing_taxable() {
        let rules = rules();
        let input = IncomeInput::contract(dec!(2500000), dec!(2500000));

        let result = ContractorEngine::new(&rules).compute_contractor_tax(&input).unwrap();

        assert_eq!(result.taxable_income, Decimal::ZERO);
        assert_eq!(result.total_tax, Decimal::ZERO);
    }

    #[test]
    fn rejects_expenses_above_gross() {
        let rules = rules();
        let input = IncomeInput::contract(dec!(2500000), dec!(2600000));

        let result = ContractorEngine::new(&rules).compute_contractor_tax(&input);

        assert_eq!(
            result,
            Err(ValidationError::ExpensesExceedGross {
                expenses: dec!(2600000),
                gross_income: dec!(2500000),
            })
        );
    }

    #[test]
    fn rejects_negative_gross() {
        let rules = rules();
        let input = IncomeInput::contract(dec!(-1), Decimal::ZERO);

        let result = ContractorEngine::new(&rules).compute_contractor_tax(&input);

        assert!(matches!(result, Err(ValidationError::NegativeAmount { .. })));
    }

    #[test]
    fn rejects_wht_credits_above_amount_limit() {
        let rules = rules();
        let input = IncomeInput {
            wht_credits: Decimal::MAX,
            ..IncomeInput::contract(dec!(6000000), dec!(1000000))
        };

        let result = ContractorEngine::new(&rules).assess(&input);

        assert!(matches!(
            result,
            Err(ValidationError::AmountTooLarge {
                field: "WHT credits",
                ..
            })
        ));
    }

    // =========================================================================
    // assess tests
    // =========================================================================

    #[test]
    fn assess_reports_profit_and_margin() {
        let rules = rules();
        let input = IncomeInput::contract(dec!(6000000), dec!(1000000));

        let assessment = ContractorEngine::new(&rules).assess(&input).unwrap();

        assert_eq!(assessment.gross_profit, dec!(5000000));
        assert_eq!(assessment.profit_margin, dec!(83.33));
        assert!(!assessment.vat_registration_required);
        assert!(assessment.qualifies_small_company);
    }

    #[test]
    fn assess_offsets_wht_credits() {
        let rules = rules();
        let input = IncomeInput {
            wht_credits: dec!(300000),
            ..IncomeInput::contract(dec!(6000000), dec!(1000000))
        };

        let assessment = ContractorEngine::new(&rules).assess(&input).unwrap();

        assert_eq!(assessment.net_tax_payable, dec!(390000));
        assert_eq!(assessment.wht_refund, Decimal::ZERO);
    }

    #[test]
    fn assess_reports_refund_when_credits_exceed_tax() {
        let rules = rules();
        let input = IncomeInput {
            wht_credits: dec!(700000),
            ..IncomeInput::contract(dec!(6000000), dec!(1000000))
        };

        let assessment = ContractorEngine::new(&rules).assess(&input).unwrap();

        assert_eq!(assessment.net_tax_payable, Decimal::ZERO);
        assert_eq!(assessment.wht_refund, dec!(10000));
    }

    #[test]
    fn assess_flags_business_thresholds() {
        let rules = rules();
        let engine = ContractorEngine::new(&rules);

        let vat = engine
            .assess(&IncomeInput::contract(dec!(25000000.01), Decimal::ZERO))
            .unwrap();
        let at_vat_limit = engine
            .assess(&IncomeInput::contract(dec!(25000000), Decimal::ZERO))
            .unwrap();
        let at_small_limit = engine
            .assess(&IncomeInput::contract(dec!(100000000), Decimal::ZERO))
            .unwrap();
        let above_small_limit = engine
            .assess(&IncomeInput::contract(dec!(100000000.01), Decimal::ZERO))
            .unwrap();

        assert!(vat.vat_registration_required);
        assert!(!at_vat_limit.vat_registration_required);
        assert!(at_small_limit.qualifies_small_company);
        assert!(!above_small_limit.qualifies_small_company);
    }

    #[test]
    fn assess_zero_gross_has_zero_margin() {
        let rules = rules();

        let assessment = ContractorEngine::new(&rules)
            .assess(&IncomeInput::contract(Decimal::ZERO, Decimal::ZERO))
            .unwrap();

        assert_eq!(assessment.profit_margin, Decimal::ZERO);
        assert_eq!(assessment.result.effective_rate, Decimal::ZERO);
    }
}
