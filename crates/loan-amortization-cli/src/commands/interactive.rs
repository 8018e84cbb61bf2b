use clap::Args;
use colored::Colorize;
use serde_json::Value;
use std::io::{self, BufRead, Write};

use loan_amortization_core::amortization::controller::{FieldUpdate, LoanCalculator, LoanForm};

use crate::input;
use crate::output;
use crate::OutputFormat;

const HELP: &str = "\
Commands:
  principal <amount>       set the loan amount
  rate <decimal>           set the annual rate (0.05 = 5%)
  term <years>             set the loan length in whole years
  frequency <key>          Monthly, Fortnightly or Weekly
  clear <field>            blank a field
  show                     re-render the schedule
  chart                    render the balance series
  help                     this text
  quit                     leave";

/// Arguments for the interactive session
#[derive(Args)]
pub struct InteractiveArgs {
    /// Start with every field blank instead of the default loan
    #[arg(long)]
    pub blank: bool,
}

enum Command {
    Update(FieldUpdate),
    Show,
    Chart,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<Command>, Box<dyn std::error::Error>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let command = match trimmed.to_lowercase().as_str() {
        "show" => Command::Show,
        "chart" => Command::Chart,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Update(FieldUpdate::parse(trimmed)?),
    };
    Ok(Some(command))
}

/// Read field edits from stdin, re-rendering the schedule after each one.
pub fn run_interactive(
    args: InteractiveArgs,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let form = if args.blank {
        LoanForm::default()
    } else {
        LoanForm::dashboard_defaults()
    };
    let mut calculator = LoanCalculator::new(form);
    let prompt = input::stdin::is_interactive();

    if prompt {
        eprintln!("{}", HELP.dimmed());
        render_report(&calculator, format);
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if prompt {
            eprint!("{} ", ">".cyan().bold());
            io::stderr().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{}: {}", "error".red().bold(), e);
                continue;
            }
        };

        match command {
            Command::Update(update) => match calculator.apply(update) {
                Ok(view) => emit(format, serde_json::to_value(&view.report)),
                Err(e) => eprintln!("{}: {}", "error".red().bold(), e),
            },
            Command::Show => render_report(&calculator, format),
            Command::Chart => match calculator.render() {
                Ok(view) => emit(format, serde_json::to_value(&view.chart)),
                Err(e) => eprintln!("{}: {}", "error".red().bold(), e),
            },
            Command::Help => eprintln!("{HELP}"),
            Command::Quit => break,
        }
    }

    log::debug!("interactive session ended with form {:?}", calculator.form());
    Ok(())
}

fn render_report(calculator: &LoanCalculator, format: &OutputFormat) {
    match calculator.render() {
        Ok(view) => emit(format, serde_json::to_value(&view.report)),
        Err(e) => eprintln!("{}: {}", "error".red().bold(), e),
    }
}

fn emit(format: &OutputFormat, value: Result<Value, serde_json::Error>) {
    match value {
        Ok(value) => output::format_output(format, &value),
        Err(e) => eprintln!("{}: {}", "error".red().bold(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_amortization_core::amortization::RepaymentFrequency;

    #[test]
    fn test_blank_and_comment_lines_are_skipped() {
        assert!(parse_command("   ").unwrap().is_none());
        assert!(parse_command("# a note").unwrap().is_none());
    }

    #[test]
    fn test_session_commands() {
        assert!(matches!(parse_command("show").unwrap(), Some(Command::Show)));
        assert!(matches!(parse_command("CHART").unwrap(), Some(Command::Chart)));
        assert!(matches!(parse_command("exit").unwrap(), Some(Command::Quit)));
        assert!(matches!(parse_command("?").unwrap(), Some(Command::Help)));
    }

    #[test]
    fn test_field_updates_pass_through() {
        match parse_command("frequency Fortnightly").unwrap() {
            Some(Command::Update(FieldUpdate::Frequency(f))) => {
                assert_eq!(f, RepaymentFrequency::Fortnightly)
            }
            _ => panic!("Expected a frequency update"),
        }
        assert!(parse_command("term twenty").is_err());
    }
}
