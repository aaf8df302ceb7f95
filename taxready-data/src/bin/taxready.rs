use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;
use taxready_core::{
    ComparisonEngine, ComparisonScenario, Contributions, ContractorEngine, IncomeInput, PayeEngine,
    PaymentType, RuleTable, TaxResult, WithholdingCalculator,
};
use taxready_data::{batch, income_loader, load_rules, logging, parse_naira, report};
use tracing::info;

/// Nigerian personal income tax calculator (Nigeria Tax Act 2025 rules).
#[derive(Parser, Debug)]
#[command(name = "taxready")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML rule table to use instead of the built-in 2026 table
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Log level or filter directive (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Append log records to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// PAYE for a salaried employee
    Paye(PayeArgs),
    /// Income tax for an independent contractor
    Contractor(ContractorArgs),
    /// Compare employment and contracting on the same gross income
    Compare(CompareArgs),
    /// Compute every row of an income CSV
    Batch(BatchArgs),
    /// Withholding tax on a single payment
    Wht(WhtArgs),
    /// Show the bands and deduction rules in force
    Bands,
}

#[derive(Args, Debug)]
struct PayeArgs {
    /// Gross annual income, e.g. 1,000,000 or ₦1,000,000
    #[arg(long, value_parser = parse_naira)]
    gross: Decimal,

    /// Annual basic salary
    #[arg(long, value_parser = parse_naira)]
    basic: Decimal,

    /// Annual housing allowance
    #[arg(long, value_parser = parse_naira, default_value = "0")]
    housing: Decimal,

    /// Annual transport allowance
    #[arg(long, value_parser = parse_naira, default_value = "0")]
    transport: Decimal,

    /// Annual rent paid
    #[arg(long, value_parser = parse_naira, default_value = "0")]
    rent: Decimal,

    /// Annual life assurance premium
    #[arg(long, value_parser = parse_naira, default_value = "0")]
    life_assurance: Decimal,

    /// Annual mortgage interest paid
    #[arg(long, value_parser = parse_naira, default_value = "0")]
    mortgage_interest: Decimal,

    /// Employee does not contribute to a pension scheme
    #[arg(long)]
    no_pension: bool,

    /// Employee does not contribute to the National Housing Fund
    #[arg(long)]
    no_nhf: bool,

    /// Employee does not contribute to NHIS
    #[arg(long)]
    no_nhis: bool,

    /// Also write the per-band breakdown to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ContractorArgs {
    /// Gross annual contract income
    #[arg(long, value_parser = parse_naira)]
    gross: Decimal,

    /// Allowable business expenses
    #[arg(long, value_parser = parse_naira, default_value = "0")]
    expenses: Decimal,

    /// Annual rent paid
    #[arg(long, value_parser = parse_naira, default_value = "0")]
    rent: Decimal,

    /// Annual life assurance premium
    #[arg(long, value_parser = parse_naira, default_value = "0")]
    life_assurance: Decimal,

    /// Voluntary pension contribution
    #[arg(long, value_parser = parse_naira, default_value = "0")]
    voluntary_pension: Decimal,

    /// Withholding tax already deducted by clients
    #[arg(long, value_parser = parse_naira, default_value = "0")]
    wht_credits: Decimal,

    /// Also write the per-band breakdown to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CompareArgs {
    /// Gross annual income for both arrangements
    #[arg(long, value_parser = parse_naira)]
    gross: Decimal,

    /// Share of gross treated as basic salary when employed (0 to 1)
    #[arg(long, default_value = "0.5")]
    basic_ratio: Decimal,

    /// Business expenses the contractor would declare
    #[arg(long, value_parser = parse_naira, default_value = "0")]
    expenses: Decimal,

    /// Annual rent paid
    #[arg(long, value_parser = parse_naira, default_value = "0")]
    rent: Decimal,

    /// Annual life assurance premium
    #[arg(long, value_parser = parse_naira, default_value = "0")]
    life_assurance: Decimal,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// CSV file of labelled income rows
    file: PathBuf,
}

#[derive(Args, Debug)]
struct WhtArgs {
    /// Payment amount before withholding
    #[arg(long, value_parser = parse_naira)]
    amount: Decimal,

    /// Payment type, e.g. consultancy, contracts, rent
    #[arg(long, value_parser = parse_payment_type)]
    payment_type: PaymentType,
}

fn parse_payment_type(s: &str) -> Result<PaymentType, String> {
    PaymentType::parse(s).ok_or_else(|| {
        let known: Vec<&str> = PaymentType::ALL.iter().map(|t| t.as_str()).collect();
        format!("unknown payment type '{s}' (expected one of: {})", known.join(", "))
    })
}

fn emit<T: Serialize>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<()> {
    match format {
        OutputFormat::Text => println!("{}", text(value)),
        OutputFormat::Json => println!("{}", report::to_json(value)?),
    }
    Ok(())
}

fn write_csv(
    result: &TaxResult,
    path: &Path,
) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create: {}", path.display()))?;
    report::write_breakdown_csv(result, file)
        .with_context(|| format!("Failed to write band breakdown: {}", path.display()))?;
    info!(path = %path.display(), "band breakdown written");
    Ok(())
}

fn run_paye(
    rules: &RuleTable,
    format: OutputFormat,
    args: PayeArgs,
) -> Result<()> {
    let input = IncomeInput {
        housing_allowance: args.housing,
        transport_allowance: args.transport,
        annual_rent_paid: args.rent,
        life_assurance_premium: args.life_assurance,
        mortgage_interest: args.mortgage_interest,
        contributions: Contributions {
            pension: !args.no_pension,
            nhf: !args.no_nhf,
            nhis: !args.no_nhis,
        },
        ..IncomeInput::salaried(args.gross, args.basic)
    };

    let result = PayeEngine::new(rules).compute_paye(&input)?;
    if let Some(path) = &args.csv {
        write_csv(&result, path)?;
    }
    emit(format, &result, report::render_statement)
}

fn run_contractor(
    rules: &RuleTable,
    format: OutputFormat,
    args: ContractorArgs,
) -> Result<()> {
    let input = IncomeInput {
        voluntary_pension: args.voluntary_pension,
        wht_credits: args.wht_credits,
        ..IncomeInput::contract(args.gross, args.expenses)
            .with_rent_paid(args.rent)
            .with_life_assurance(args.life_assurance)
    };

    let assessment = ContractorEngine::new(rules).assess(&input)?;
    if let Some(path) = &args.csv {
        write_csv(&assessment.result, path)?;
    }
    emit(format, &assessment, report::render_assessment)
}

fn run_compare(
    rules: &RuleTable,
    format: OutputFormat,
    args: CompareArgs,
) -> Result<()> {
    let scenario = ComparisonScenario {
        annual_rent_paid: args.rent,
        life_assurance_premium: args.life_assurance,
        ..ComparisonScenario::new(args.gross, args.basic_ratio, args.expenses)
    };

    let comparison = ComparisonEngine::new(rules).compare_scenario(&scenario)?;
    emit(format, &comparison, report::render_comparison)
}

fn run_batch(
    rules: &RuleTable,
    format: OutputFormat,
    args: BatchArgs,
) -> Result<()> {
    let rows = income_loader::load_from_file(&args.file)
        .with_context(|| format!("Failed to load incomes: {}", args.file.display()))?;
    info!(rows = rows.len(), file = %args.file.display(), "batch loaded");

    let entries = batch::run(rules, rows);
    emit(format, &entries, |entries| report::render_batch(entries))
}

fn run_wht(
    rules: &RuleTable,
    format: OutputFormat,
    args: WhtArgs,
) -> Result<()> {
    let wht = WithholdingCalculator::new(rules).compute(args.amount, args.payment_type)?;
    emit(format, &wht, report::render_withholding)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_level.as_deref(), cli.log_file.as_deref())?;

    let rules = load_rules(cli.rules.as_deref()).context("Failed to load rule table")?;

    match cli.command {
        Command::Paye(args) => run_paye(&rules, cli.format, args),
        Command::Contractor(args) => run_contractor(&rules, cli.format, args),
        Command::Compare(args) => run_compare(&rules, cli.format, args),
        Command::Batch(args) => run_batch(&rules, cli.format, args),
        Command::Wht(args) => run_wht(&rules, cli.format, args),
        Command::Bands => emit(cli.format, &rules, report::render_rules),
    }
}
