mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::interactive::InteractiveArgs;
use commands::loan::{ChartArgs, LoanArgs};

/// Loan amortization schedules from the command line
#[derive(Parser)]
#[command(
    name = "amort",
    version,
    about = "Loan amortization schedules, payments and balance charts",
    long_about = "Computes the fixed periodic repayment of a loan and its full amortization \
                  schedule (interest, principal and remaining balance per period) with \
                  decimal precision. Supports monthly, fortnightly and weekly repayments."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the full amortization schedule
    Schedule(LoanArgs),
    /// Calculate the fixed periodic payment only
    Payment(LoanArgs),
    /// Balance-over-time series for the amortization graph
    Chart(ChartArgs),
    /// Edit loan fields line by line and recompute after each change
    Interactive(InteractiveArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Payment(args) => commands::loan::run_payment(args),
        Commands::Chart(args) => commands::loan::run_chart(args),
        Commands::Interactive(args) => {
            if let Err(e) = commands::interactive::run_interactive(args, &cli.output) {
                eprintln!("{}: {}", "error".red().bold(), e);
                process::exit(1);
            }
            return;
        }
        Commands::Version => {
            println!("amort {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
