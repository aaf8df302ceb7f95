//! Text, CSV and JSON renderings of calculation results.
//!
//! Text output is for terminals. JSON serializes the result records as they
//! are, so field names match the library types.

use std::io::Write;

use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};
use taxready_core::{
    BandTax, ComparisonResult, ContractorAssessment, Regime, RuleTable, TaxResult, WithholdingResult,
};

use crate::batch::BatchEntry;
use crate::money::{format_naira, format_rate};

#[derive(Debug, Clone, Tabled)]
struct DeductionRow {
    #[tabled(rename = "Deduction")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Debug, Clone, Tabled)]
struct BandRow {
    #[tabled(rename = "Band")]
    band: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Taxed")]
    taxed: String,
    #[tabled(rename = "Tax")]
    tax: String,
}

#[derive(Debug, Clone, Tabled)]
struct RuleBandRow {
    #[tabled(rename = "Band")]
    band: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Rate")]
    rate: String,
}

#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Regime")]
    regime: &'static str,
    #[tabled(rename = "Gross")]
    gross: String,
    #[tabled(rename = "Taxable")]
    taxable: String,
    #[tabled(rename = "Tax")]
    tax: String,
    #[tabled(rename = "Net")]
    net: String,
    #[tabled(rename = "Effective")]
    effective: String,
}

#[derive(Debug, Clone, Tabled)]
struct SkippedRow {
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Regime")]
    regime: &'static str,
    #[tabled(rename = "Reason")]
    reason: String,
}

#[derive(Debug, Clone, Tabled)]
struct ComparisonRow {
    #[tabled(rename = "")]
    item: &'static str,
    #[tabled(rename = "PAYE")]
    paye: String,
    #[tabled(rename = "Contractor")]
    contractor: String,
}

/// One CSV record of the per-band breakdown.
#[derive(Debug, Clone, Serialize)]
struct BreakdownRecord<'a> {
    band: &'a str,
    lower_bound: Decimal,
    upper_bound: Option<Decimal>,
    rate: Decimal,
    taxable_amount_in_band: Decimal,
    tax_amount: Decimal,
}

fn regime_title(regime: Regime) -> &'static str {
    match regime {
        Regime::Paye => "PAYE (employee)",
        Regime::Contractor => "Contractor (self-employed)",
    }
}

fn band_label(band_tax: &BandTax) -> String {
    if !band_tax.band.label.is_empty() {
        return band_tax.band.label.clone();
    }
    match band_tax.band.upper_bound {
        Some(upper) => format!(
            "{} - {}",
            format_naira(band_tax.band.lower_bound),
            format_naira(upper)
        ),
        None => format!("Above {}", format_naira(band_tax.band.lower_bound)),
    }
}

fn right_aligned<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string()
}

fn band_table(per_band: &[BandTax]) -> String {
    let rows: Vec<BandRow> = per_band
        .iter()
        .map(|b| BandRow {
            band: band_label(b),
            rate: format_rate(b.band.rate),
            taxed: format_naira(b.taxable_amount_in_band),
            tax: format_naira(b.tax_amount),
        })
        .collect();
    right_aligned(rows)
}

/// Renders an itemized tax statement.
pub fn render_statement(result: &TaxResult) -> String {
    let deductions: Vec<DeductionRow> = result
        .deductions
        .iter()
        .map(|line| DeductionRow {
            name: line.name.clone(),
            amount: format_naira(line.amount),
        })
        .collect();

    let lines = [
        format!("{} TAX STATEMENT", regime_title(result.regime).to_uppercase()),
        String::new(),
        format!("Gross income:          {}", format_naira(result.gross_income)),
        String::new(),
        right_aligned(deductions),
        format!("Total deductions:      {}", format_naira(result.total_deductions)),
        format!("Taxable income:        {}", format_naira(result.taxable_income)),
        String::new(),
        band_table(&result.tax_per_band),
        format!("Total tax:             {}", format_naira(result.total_tax)),
        format!("Effective rate:        {}%", result.effective_rate),
        format!("Marginal rate:         {}", format_rate(result.marginal_rate)),
        format!("Monthly tax:           {}", format_naira(result.monthly_tax)),
        format!("Net income:            {}", format_naira(result.net_income)),
        format!("Net monthly income:    {}", format_naira(result.net_monthly_income)),
    ];
    lines.join("\n")
}

/// Renders a contractor statement followed by WHT and business figures.
pub fn render_assessment(assessment: &ContractorAssessment) -> String {
    let mut lines = vec![
        render_statement(&assessment.result),
        String::new(),
        format!("Gross profit:          {}", format_naira(assessment.gross_profit)),
        format!("Profit margin:         {}%", assessment.profit_margin),
        format!("WHT credits:           {}", format_naira(assessment.wht_credits)),
        format!("Net tax payable:       {}", format_naira(assessment.net_tax_payable)),
    ];
    if assessment.wht_refund > Decimal::ZERO {
        lines.push(format!("WHT refund due:        {}", format_naira(assessment.wht_refund)));
    }
    if assessment.vat_registration_required {
        lines.push("VAT registration required: turnover exceeds the threshold".to_string());
    }
    if assessment.qualifies_small_company {
        lines.push("Turnover is within the small company limit".to_string());
    }
    lines.join("\n")
}

/// Renders both sides of a comparison and the recommendation.
pub fn render_comparison(comparison: &ComparisonResult) -> String {
    let paye = &comparison.paye_result;
    let contractor = &comparison.contractor_result;
    let row = |item: &'static str, employee: Decimal, self_employed: Decimal| ComparisonRow {
        item,
        paye: format_naira(employee),
        contractor: format_naira(self_employed),
    };

    let rows = vec![
        row("Total deductions", paye.total_deductions, contractor.total_deductions),
        row("Taxable income", paye.taxable_income, contractor.taxable_income),
        row("Total tax", paye.total_tax, contractor.total_tax),
        row("Net income", paye.net_income, contractor.net_income),
        row("Net monthly income", paye.net_monthly_income, contractor.net_monthly_income),
        ComparisonRow {
            item: "Effective rate",
            paye: format!("{}%", paye.effective_rate),
            contractor: format!("{}%", contractor.effective_rate),
        },
    ];

    let lines = [
        format!("PAYE VS CONTRACTOR ON {}", format_naira(comparison.gross_income)),
        String::new(),
        right_aligned(rows),
        format!("Net difference:        {}", format_naira(comparison.net_difference)),
        format!("Tax difference:        {}", format_naira(comparison.tax_difference)),
        format!(
            "Recommendation:        {} (neutral zone {})",
            comparison.recommendation,
            format_naira(comparison.neutral_zone)
        ),
    ];
    lines.join("\n")
}

/// Renders one withholding calculation.
pub fn render_withholding(wht: &WithholdingResult) -> String {
    [
        format!("Payment type:          {}", wht.payment_type.as_str()),
        format!("Gross amount:          {}", format_naira(wht.gross_amount)),
        format!("WHT rate:              {}", format_rate(wht.rate)),
        format!("WHT deducted:          {}", format_naira(wht.wht_amount)),
        format!("Net payment:           {}", format_naira(wht.net_payment)),
    ]
    .join("\n")
}

/// Renders a batch as a summary table of computed rows, followed by the
/// rows that were skipped and why.
pub fn render_batch(entries: &[BatchEntry]) -> String {
    let rows: Vec<SummaryRow> = entries
        .iter()
        .filter_map(|entry| entry.result().map(|r| (entry, r)))
        .map(|(entry, r)| SummaryRow {
            label: entry.label.clone(),
            regime: r.regime.as_str(),
            gross: format_naira(r.gross_income),
            taxable: format_naira(r.taxable_income),
            tax: format_naira(r.total_tax),
            net: format_naira(r.net_income),
            effective: format!("{}%", r.effective_rate),
        })
        .collect();

    let skipped: Vec<SkippedRow> = entries
        .iter()
        .filter_map(|entry| {
            entry.skipped_reason().map(|reason| SkippedRow {
                label: entry.label.clone(),
                regime: entry.regime.as_str(),
                reason: reason.to_string(),
            })
        })
        .collect();

    let mut lines = vec![right_aligned(rows)];
    if !skipped.is_empty() {
        lines.push(format!("Skipped {} of {} rows:", skipped.len(), entries.len()));
        lines.push(Table::new(skipped).with(Style::rounded()).to_string());
    }
    lines.join("\n")
}

/// Renders the band table and deduction rules of a rule table.
pub fn render_rules(rules: &RuleTable) -> String {
    let bands: Vec<RuleBandRow> = rules
        .bands()
        .iter()
        .map(|band| RuleBandRow {
            band: band.label.clone(),
            from: format_naira(band.lower_bound),
            to: band.upper_bound.map_or_else(|| "-".to_string(), format_naira),
            rate: format_rate(band.rate),
        })
        .collect();

    let deductions: Vec<DeductionRow> = rules
        .deductions()
        .iter()
        .map(|(_, rule)| DeductionRow {
            name: rule.name.clone(),
            amount: match rule.cap {
                Some(cap) => format!("{} up to {}", format_rate(rule.basis_rate), format_naira(cap)),
                None => format_rate(rule.basis_rate),
            },
        })
        .collect();

    [
        format!("{} ({})", rules.name(), rules.tax_year()),
        String::new(),
        right_aligned(bands),
        right_aligned(deductions),
    ]
    .join("\n")
}

/// Writes the per-band breakdown of `result` as CSV with a header row.
pub fn write_breakdown_csv<W: Write>(
    result: &TaxResult,
    writer: W,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for band_tax in &result.tax_per_band {
        csv_writer.serialize(BreakdownRecord {
            band: &band_tax.band.label,
            lower_bound: band_tax.band.lower_bound,
            upper_bound: band_tax.band.upper_bound,
            rate: band_tax.band.rate,
            taxable_amount_in_band: band_tax.taxable_amount_in_band,
            tax_amount: band_tax.tax_amount,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Pretty-printed JSON of any result record.
pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
