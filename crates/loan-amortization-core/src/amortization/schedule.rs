use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::frequency::RepaymentFrequency;
use super::payment::{compute_payment, periodic_rate, total_periods};
use super::round_cents;
use crate::error::AmortizationError;
use crate::types::{Money, Rate};
use crate::AmortizationResult;

// ---------------------------------------------------------------------------
// Input / Output Types
// ---------------------------------------------------------------------------

/// Terms of a fixed-rate, level-payment loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanInput {
    /// Amount borrowed.
    pub principal: Money,
    /// Nominal annual rate as a decimal fraction (0.05 = 5%).
    pub annual_rate: Rate,
    /// Length of the loan in whole years.
    pub term_years: u32,
    pub frequency: RepaymentFrequency,
}

impl LoanInput {
    pub fn periods_per_year(&self) -> u32 {
        self.frequency.periods_per_year()
    }

    /// Reject degenerate terms before any arithmetic runs.
    pub fn validate(&self) -> AmortizationResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(AmortizationError::invalid(
                "principal",
                "Principal must be positive",
            ));
        }
        if self.term_years == 0 {
            return Err(AmortizationError::invalid(
                "term_years",
                "Loan term must be at least one year",
            ));
        }
        periodic_rate(self.annual_rate, self.periods_per_year())?;
        total_periods(self.term_years, self.periods_per_year())?;
        Ok(())
    }
}

/// One line of the amortization table.
///
/// Serialized with the column names of the rendered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PeriodRow {
    pub period: u32,
    pub interest: Money,
    pub principal: Money,
    /// Remaining balance. Can dip a few cents below zero on the last rows.
    pub balance: Money,
}

impl PeriodRow {
    /// Synthetic row 0: nothing paid yet, full principal outstanding.
    pub fn opening(principal: Money) -> Self {
        PeriodRow {
            period: 0,
            interest: Decimal::ZERO,
            principal: Decimal::ZERO,
            balance: principal,
        }
    }
}

/// Ordered amortization table, row 0 included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    rows: Vec<PeriodRow>,
}

impl Schedule {
    pub fn rows(&self) -> &[PeriodRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<PeriodRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PeriodRow> {
        self.rows.iter()
    }

    /// Number of repayment periods, excluding the opening row.
    pub fn repayment_periods(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    pub fn final_balance(&self) -> Money {
        self.rows.last().map(|r| r.balance).unwrap_or(Decimal::ZERO)
    }

    /// Sum of the rounded interest column.
    pub fn total_interest(&self) -> AmortizationResult<Money> {
        column_total("interest", self.rows.iter().map(|r| r.interest))
    }

    /// Sum of the rounded principal column.
    pub fn total_principal(&self) -> AmortizationResult<Money> {
        column_total("principal", self.rows.iter().map(|r| r.principal))
    }
}

fn column_total(column: &str, mut values: impl Iterator<Item = Money>) -> AmortizationResult<Money> {
    values
        .try_fold(Decimal::ZERO, |total, value| total.checked_add(value))
        .ok_or_else(|| {
            AmortizationError::FinancialImpossibility(format!(
                "{column} column total exceeds decimal range"
            ))
        })
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a PeriodRow;
    type IntoIter = std::slice::Iter<'a, PeriodRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

// ---------------------------------------------------------------------------
// Schedule construction
// ---------------------------------------------------------------------------

/// Build the full amortization schedule for a level-payment loan.
///
/// Each period accrues `r * balance` of interest; the rest of the fixed
/// payment retires principal. The displayed interest and principal figures
/// are rounded to cents, but the principal portion is taken from the
/// unrounded accrual, and the balance is rounded to cents every period, so
/// rounding drift accumulates the way a ledger's would. The last balance is
/// therefore usually a few cents away from zero.
pub fn build_schedule(
    principal: Money,
    annual_rate: Rate,
    term_years: u32,
    frequency: RepaymentFrequency,
) -> AmortizationResult<Schedule> {
    let input = LoanInput {
        principal,
        annual_rate,
        term_years,
        frequency,
    };
    input.validate()?;

    let periods_per_year = frequency.periods_per_year();
    let rate = periodic_rate(annual_rate, periods_per_year)?;
    let n = total_periods(term_years, periods_per_year)?;
    let payment = compute_payment(principal, annual_rate, term_years, periods_per_year)?;

    log::debug!(
        "building {n}-period {frequency} schedule: periodic rate {rate}, payment {payment}"
    );

    let mut rows = Vec::with_capacity(n as usize + 1);
    rows.push(PeriodRow::opening(principal));

    let mut balance = principal;
    for period in 1..=n {
        let accrued = rate * balance;
        let principal_paid = payment - accrued;
        let next_balance = round_cents(balance - principal_paid);

        rows.push(PeriodRow {
            period,
            interest: round_cents(accrued),
            principal: round_cents(principal_paid),
            balance: next_balance,
        });
        balance = next_balance;
    }

    Ok(Schedule { rows })
}

/// [`build_schedule`] driven by a [`LoanInput`].
pub fn build_schedule_for(input: &LoanInput) -> AmortizationResult<Schedule> {
    build_schedule(
        input.principal,
        input.annual_rate,
        input.term_years,
        input.frequency,
    )
}
