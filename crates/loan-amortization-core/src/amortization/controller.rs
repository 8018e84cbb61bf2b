//! Form-driven recomputation.
//!
//! A [`LoanCalculator`] holds the current state of the four loan fields,
//! any of which may be blank while a user is editing. Every accepted
//! [`FieldUpdate`] triggers a full rebuild of the report and chart; nothing
//! from a previous schedule is reused.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::chart::{balance_chart, BalanceChart};
use super::frequency::RepaymentFrequency;
use super::report::{amortize, AmortizationOutput};
use super::schedule::LoanInput;
use crate::error::AmortizationError;
use crate::types::{ComputationOutput, Money, Rate};
use crate::AmortizationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanField {
    Principal,
    AnnualRate,
    TermYears,
    Frequency,
}

impl LoanField {
    pub const fn name(self) -> &'static str {
        match self {
            LoanField::Principal => "principal",
            LoanField::AnnualRate => "annual_rate",
            LoanField::TermYears => "term_years",
            LoanField::Frequency => "frequency",
        }
    }
}

impl fmt::Display for LoanField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LoanField {
    type Err = AmortizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "principal" | "amount" => Ok(LoanField::Principal),
            "rate" | "annual_rate" | "interest_rate" => Ok(LoanField::AnnualRate),
            "term" | "term_years" | "years" => Ok(LoanField::TermYears),
            "frequency" | "freq" => Ok(LoanField::Frequency),
            other => Err(AmortizationError::invalid(
                "field",
                format!("Unknown field '{other}'. Use: principal, rate, term, frequency"),
            )),
        }
    }
}

/// One edit to the loan form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Principal(Money),
    AnnualRate(Rate),
    TermYears(u32),
    Frequency(RepaymentFrequency),
    Clear(LoanField),
}

impl FieldUpdate {
    /// Parse `<field> <value>` or `clear <field>`.
    pub fn parse(line: &str) -> AmortizationResult<Self> {
        let mut parts = line.split_whitespace();
        let head = parts
            .next()
            .ok_or_else(|| AmortizationError::invalid("field", "Empty update"))?;
        let value = parts.next();
        if parts.next().is_some() {
            return Err(AmortizationError::invalid(
                "field",
                format!("Expected '<field> <value>', got '{}'", line.trim()),
            ));
        }

        if head.eq_ignore_ascii_case("clear") {
            let field = value.ok_or_else(|| {
                AmortizationError::invalid("field", "Usage: clear <field>")
            })?;
            return Ok(FieldUpdate::Clear(field.parse()?));
        }

        let field: LoanField = head.parse()?;
        let value = value.ok_or_else(|| {
            AmortizationError::invalid(field.name(), "Missing value")
        })?;
        FieldUpdate::from_value(field, value)
    }

    fn from_value(field: LoanField, value: &str) -> AmortizationResult<Self> {
        match field {
            LoanField::Principal => Ok(FieldUpdate::Principal(parse_decimal(field, value)?)),
            LoanField::AnnualRate => Ok(FieldUpdate::AnnualRate(parse_decimal(field, value)?)),
            LoanField::TermYears => value.parse::<u32>().map(FieldUpdate::TermYears).map_err(|_| {
                AmortizationError::invalid(
                    field.name(),
                    format!("'{value}' is not a whole number of years"),
                )
            }),
            LoanField::Frequency => Ok(FieldUpdate::Frequency(value.parse()?)),
        }
    }
}

fn parse_decimal(field: LoanField, value: &str) -> AmortizationResult<Decimal> {
    Decimal::from_str(value).map_err(|_| {
        AmortizationError::invalid(field.name(), format!("'{value}' is not a number"))
    })
}

/// Current contents of the loan form. Blank fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanForm {
    pub principal: Option<Money>,
    pub annual_rate: Option<Rate>,
    pub term_years: Option<u32>,
    pub frequency: Option<RepaymentFrequency>,
}

impl LoanForm {
    /// The form as first shown: 100,000 at 5% over 20 years, monthly.
    pub fn dashboard_defaults() -> Self {
        LoanForm {
            principal: Some(dec!(100000)),
            annual_rate: Some(dec!(0.05)),
            term_years: Some(20),
            frequency: Some(RepaymentFrequency::Monthly),
        }
    }

    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Principal(v) => self.principal = Some(v),
            FieldUpdate::AnnualRate(v) => self.annual_rate = Some(v),
            FieldUpdate::TermYears(v) => self.term_years = Some(v),
            FieldUpdate::Frequency(v) => self.frequency = Some(v),
            FieldUpdate::Clear(LoanField::Principal) => self.principal = None,
            FieldUpdate::Clear(LoanField::AnnualRate) => self.annual_rate = None,
            FieldUpdate::Clear(LoanField::TermYears) => self.term_years = None,
            FieldUpdate::Clear(LoanField::Frequency) => self.frequency = None,
        }
    }

    /// Complete loan terms, or InvalidInput naming the first blank field.
    pub fn to_input(&self) -> AmortizationResult<LoanInput> {
        Ok(LoanInput {
            principal: self.principal.ok_or_else(|| missing(LoanField::Principal))?,
            annual_rate: self.annual_rate.ok_or_else(|| missing(LoanField::AnnualRate))?,
            term_years: self.term_years.ok_or_else(|| missing(LoanField::TermYears))?,
            frequency: self.frequency.ok_or_else(|| missing(LoanField::Frequency))?,
        })
    }
}

fn missing(field: LoanField) -> AmortizationError {
    AmortizationError::invalid(field.name(), "Missing required field")
}

/// Everything the presentation layer redraws after an edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationView {
    pub report: ComputationOutput<AmortizationOutput>,
    pub chart: BalanceChart,
}

#[derive(Debug, Clone, Default)]
pub struct LoanCalculator {
    form: LoanForm,
}

impl LoanCalculator {
    pub fn new(form: LoanForm) -> Self {
        LoanCalculator { form }
    }

    pub fn with_dashboard_defaults() -> Self {
        LoanCalculator::new(LoanForm::dashboard_defaults())
    }

    pub fn form(&self) -> &LoanForm {
        &self.form
    }

    /// Record `update` and rebuild. The update is kept even when the
    /// rebuild fails, so a later edit can complete the form.
    pub fn apply(&mut self, update: FieldUpdate) -> AmortizationResult<AmortizationView> {
        log::debug!("applying form update {update:?}");
        self.form.apply(update);
        self.render()
    }

    /// Rebuild the view from the current form.
    pub fn render(&self) -> AmortizationResult<AmortizationView> {
        let input = self.form.to_input()?;
        let report = amortize(&input)?;
        let chart = balance_chart(&report.result.schedule, input.frequency, input.term_years);
        Ok(AmortizationView { report, chart })
    }
}
