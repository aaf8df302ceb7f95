//! Integration tests for loading income batches and rule tables from disk.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use taxready_core::{
    ComparisonEngine, ComparisonResult, ConfigurationError, ContractorEngine, IncomeInput,
    PayeEngine, Recommendation, Regime, RuleTable, TaxResult, ValidationError,
};
use taxready_data::{RulesLoadError, batch, income_loader, load_rules, report};

const INCOMES_CSV: &str = include_str!("../test-data/incomes.csv");

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("test-data").join(name)
}

fn compute(
    rules: &RuleTable,
    regime: Regime,
    input: &IncomeInput,
) -> Result<TaxResult, ValidationError> {
    match regime {
        Regime::Paye => PayeEngine::new(rules).compute_paye(input),
        Regime::Contractor => ContractorEngine::new(rules).compute_contractor_tax(input),
    }
}

// =============================================================================
// income batch
// =============================================================================

#[test]
fn test_batch_file_loads_every_row() {
    let rows = income_loader::load_from_file(&fixture("incomes.csv")).expect("fixture loads");

    assert_eq!(rows.len(), 5);
    assert_eq!(rows, income_loader::load_from_str(INCOMES_CSV).expect("same text"));
}

#[test]
fn test_batch_rows_compute_expected_tax() {
    let rules = load_rules(None).expect("built-in table");
    let rows = income_loader::load_from_str(INCOMES_CSV).expect("fixture loads");

    let taxes: Vec<(String, Decimal)> = rows
        .iter()
        .take(4)
        .map(|row| {
            let result = compute(&rules, row.regime, &row.input).expect("valid row");
            (row.label.clone(), result.total_tax)
        })
        .collect();

    assert_eq!(
        taxes,
        vec![
            ("Entry-level analyst".to_string(), dec!(19890)),
            ("Senior engineer".to_string(), dec!(664008)),
            ("Consultant".to_string(), dec!(690000)),
            ("Designer".to_string(), dec!(348000)),
        ]
    );
}

#[test]
fn test_batch_invalid_row_fails_validation_only_for_that_row() {
    let rules = load_rules(None).expect("built-in table");
    let rows = income_loader::load_from_str(INCOMES_CSV).expect("fixture loads");
    let overstated = &rows[4];

    let result = compute(&rules, overstated.regime, &overstated.input);

    assert_eq!(
        result,
        Err(ValidationError::BasicSalaryExceedsGross {
            basic_salary: dec!(1200000),
            gross_income: dec!(1000000),
        })
    );
}

#[test]
fn test_batch_run_reports_skipped_row_alongside_results() {
    let rules = load_rules(None).expect("built-in table");
    let rows = income_loader::load_from_file(&fixture("incomes.csv")).expect("fixture loads");

    let entries = batch::run(&rules, rows);

    assert_eq!(entries.len(), 5);
    assert_eq!(entries.iter().filter(|e| e.result().is_some()).count(), 4);
    assert_eq!(entries[4].label, "Overstated salary");
    assert_eq!(
        entries[4].skipped_reason(),
        Some("basic salary 1200000 exceeds gross annual income 1000000")
    );

    let json = report::to_json(&entries).expect("serializable");
    assert!(json.contains("\"status\": \"skipped\""));
}

#[test]
fn test_batch_contractor_wht_credits_settle_tax() {
    let rules = load_rules(None).expect("built-in table");
    let rows = income_loader::load_from_str(INCOMES_CSV).expect("fixture loads");
    let consultant = &rows[2];

    let assessment = ContractorEngine::new(&rules)
        .assess(&consultant.input)
        .expect("valid row");

    assert_eq!(assessment.wht_credits, dec!(300000));
    assert_eq!(assessment.net_tax_payable, dec!(390000));
}

// =============================================================================
// rule table files
// =============================================================================

#[test]
fn test_alternative_rule_table_changes_the_result() {
    let rules = load_rules(Some(&fixture("flat_rules.toml"))).expect("fixture table");

    let result = PayeEngine::new(&rules)
        .compute_paye(&IncomeInput::salaried(dec!(2000000), dec!(1000000)))
        .expect("valid input");

    assert_eq!(rules.tax_year(), 2027);
    // pension 10% of 1,000,000 + NHF 2,400 + NHIS 50,000
    assert_eq!(result.total_deductions, dec!(152400));
    assert_eq!(result.taxable_income, dec!(1847600));
    assert_eq!(result.total_tax, dec!(84760));
    assert_eq!(result.net_income, dec!(1815240));
    assert_eq!(result.tax_per_band.len(), 2);
}

#[test]
fn test_alternative_rule_table_without_withholding_rates_uses_default() {
    let rules = load_rules(Some(&fixture("flat_rules.toml"))).expect("fixture table");

    assert!(rules.withholding().rates.is_empty());
    assert_eq!(
        rules.withholding().rate_for(taxready_core::PaymentType::Royalties),
        dec!(0.05)
    );
}

#[test]
fn test_zero_neutral_zone_still_reports_identical_outcomes_as_comparable() {
    let rules = load_rules(Some(&fixture("flat_rules.toml"))).expect("fixture table");

    let comparison = ComparisonEngine::new(&rules)
        .compare(dec!(1500000), Decimal::ZERO, Decimal::ZERO)
        .expect("valid input");

    assert_eq!(comparison.neutral_zone, Decimal::ZERO);
    assert_eq!(comparison.net_difference, Decimal::ZERO);
    assert_eq!(comparison.recommendation, Recommendation::Comparable);
}

#[test]
fn test_gapped_rule_table_is_rejected() {
    let result = load_rules(Some(&fixture("gapped_rules.toml")));

    match result {
        Err(RulesLoadError::Invalid(error)) => assert_eq!(
            error,
            ConfigurationError::NonContiguousBands {
                index: 1,
                expected: dec!(800000),
                found: dec!(900000),
            }
        ),
        other => panic!("expected Invalid, got {other:?}"),
    }
}

// =============================================================================
// exports
// =============================================================================

#[test]
fn test_comparison_json_reads_back_unchanged() {
    let rules = load_rules(None).expect("built-in table");
    let comparison = ComparisonEngine::new(&rules)
        .compare(dec!(6000000), dec!(0.5), dec!(1000000))
        .expect("valid input");

    let json = report::to_json(&comparison).expect("serializable");
    let parsed: ComparisonResult = serde_json::from_str(&json).expect("deserializable");

    assert_eq!(parsed, comparison);
}

#[test]
fn test_breakdown_csv_written_to_disk() {
    let rules = load_rules(None).expect("built-in table");
    let result = PayeEngine::new(&rules)
        .compute_paye(&IncomeInput::salaried(dec!(60000000), dec!(30000000)))
        .expect("valid input");

    let path = std::env::temp_dir().join(format!("taxready-breakdown-{}.csv", std::process::id()));
    let file = std::fs::File::create(&path).expect("temp file");
    report::write_breakdown_csv(&result, file).expect("written");

    let written = std::fs::read_to_string(&path).expect("readable");
    std::fs::remove_file(&path).ok();

    let mut reader = csv::Reader::from_reader(written.as_bytes());
    let taxes: Vec<Decimal> = reader
        .records()
        .map(|record| {
            let record = record.expect("valid record");
            record[5].parse::<Decimal>().expect("decimal")
        })
        .collect();

    assert_eq!(taxes.len(), 6);
    assert_eq!(taxes.iter().copied().sum::<Decimal>(), result.total_tax);
}
