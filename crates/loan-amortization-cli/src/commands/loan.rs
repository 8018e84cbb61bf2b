use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::time::Instant;

use loan_amortization_core::amortization::chart::balance_chart;
use loan_amortization_core::amortization::report::{amortize, calculate_payment};
use loan_amortization_core::amortization::{LoanInput, RepaymentFrequency};
use loan_amortization_core::with_metadata;

use crate::input;

/// Loan terms. Flag defaults match the calculator's opening form.
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct LoanArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Principal amount of the loan
    #[arg(long, default_value = "100000")]
    pub principal: Decimal,

    /// Interest rate per annum as a decimal (0.05 = 5%)
    #[arg(long, alias = "rate", default_value = "0.05")]
    pub annual_rate: Decimal,

    /// Length of the loan in years
    #[arg(long, alias = "years", default_value_t = 20)]
    pub term_years: u32,

    /// Repayment frequency: Monthly, Fortnightly, Weekly
    #[arg(long, default_value = "Monthly")]
    pub frequency: RepaymentFrequency,
}

/// Arguments for the balance chart
#[derive(Args)]
pub struct ChartArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Emit a plotly-compatible figure instead of the point series
    #[arg(long)]
    pub figure: bool,
}

impl LoanArgs {
    /// Input file first, then piped JSON, then flags.
    pub fn resolve(&self) -> Result<LoanInput, Box<dyn std::error::Error>> {
        if let Some(ref path) = self.input {
            return input::file::read_input(path);
        }
        let piped = input::stdin::read_loan()?;
        Ok(self.or_piped(piped))
    }

    fn or_piped(&self, piped: Option<LoanInput>) -> LoanInput {
        piped.unwrap_or_else(|| self.flag_input())
    }

    /// Loan terms exactly as given on the command line, zeros included.
    fn flag_input(&self) -> LoanInput {
        LoanInput {
            principal: self.principal,
            annual_rate: self.annual_rate,
            term_years: self.term_years,
            frequency: self.frequency,
        }
    }
}

pub fn run_schedule(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = args.resolve()?;
    let result = amortize(&loan)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_payment(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = args.resolve()?;
    let result = calculate_payment(&loan)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_chart(args: ChartArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let loan = args.loan.resolve()?;
    let report = amortize(&loan)?;
    let chart = balance_chart(&report.result.schedule, loan.frequency, loan.term_years);

    if args.figure {
        return Ok(chart.to_figure());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let output = with_metadata(
        "Remaining balance by payment period",
        &loan,
        report.warnings,
        elapsed,
        chart,
    );
    Ok(serde_json::to_value(output)?)
}
