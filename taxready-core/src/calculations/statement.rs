//! Turns an itemized deduction list into a complete [`TaxResult`].

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{monthly, percentage_of, round_half_up};
use crate::calculations::deductions::{taxable_income, total_deductions};
use crate::calculations::progressive::ProgressiveTaxCalculator;
use crate::models::{DeductionLine, Regime, RuleTable, TaxResult};

/// Runs the shared tail of both pipelines: total the deductions, floor the
/// taxable income, apply the bands, and derive net and monthly figures.
///
/// `take_home_deduction` is money that reduces net income besides tax, such
/// as a pension contribution.
pub(crate) fn assemble(
    rules: &RuleTable,
    regime: Regime,
    gross_income: Decimal,
    deductions: Vec<DeductionLine>,
    take_home_deduction: Decimal,
) -> TaxResult {
    let total_deductions = total_deductions(&deductions);
    let taxable_income = taxable_income(gross_income, total_deductions);

    let calculator = ProgressiveTaxCalculator::new(rules.bands());
    let tax = calculator.compute_tax(taxable_income);

    let net_income = round_half_up(gross_income - tax.total_tax - take_home_deduction);
    let effective_rate = percentage_of(tax.total_tax, gross_income);

    debug!(
        regime = regime.as_str(),
        %gross_income,
        %total_deductions,
        %taxable_income,
        total_tax = %tax.total_tax,
        %net_income,
        "tax result assembled"
    );

    TaxResult {
        regime,
        gross_income,
        deductions,
        total_deductions,
        taxable_income,
        monthly_tax: monthly(tax.total_tax),
        tax_per_band: tax.per_band,
        total_tax: tax.total_tax,
        net_income,
        effective_rate,
        marginal_rate: calculator.marginal_rate(taxable_income),
        net_monthly_income: monthly(net_income),
    }
}
