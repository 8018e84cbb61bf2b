//! Amortization results wrapped in the standard computation envelope.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::frequency::RepaymentFrequency;
use super::payment::{compute_payment, periodic_rate, total_periods};
use super::round_cents;
use super::schedule::{build_schedule_for, LoanInput, Schedule};
use crate::error::AmortizationError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::AmortizationResult;

const METHODOLOGY: &str = "Level-payment annuity amortization";

// ---------------------------------------------------------------------------
// Output Types
// ---------------------------------------------------------------------------

/// Headline figures for a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationSummary {
    /// Periodic payment rounded to cents.
    pub payment: Money,
    pub total_interest: Money,
    pub total_principal: Money,
    /// Interest plus principal actually shown in the table.
    pub total_paid: Money,
    pub final_balance: Money,
}

/// Full amortization result: terms resolved to periods, summary and table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationOutput {
    pub frequency: RepaymentFrequency,
    pub periods_per_year: u32,
    pub total_periods: u32,
    pub periodic_rate: Rate,
    /// Unrounded periodic payment driving every row.
    pub payment: Money,
    pub summary: AmortizationSummary,
    pub schedule: Schedule,
}

/// Payment figures without the table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOutput {
    pub frequency: RepaymentFrequency,
    pub periods_per_year: u32,
    pub total_periods: u32,
    pub periodic_rate: Rate,
    pub payment: Money,
    pub payment_rounded: Money,
    /// `payment * n - principal`, before any per-period rounding.
    pub lifetime_interest: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the schedule for `input` and summarise it.
pub fn amortize(input: &LoanInput) -> AmortizationResult<ComputationOutput<AmortizationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.validate()?;

    let periods_per_year = input.periods_per_year();
    let rate = periodic_rate(input.annual_rate, periods_per_year)?;
    let n = total_periods(input.term_years, periods_per_year)?;
    let payment = compute_payment(
        input.principal,
        input.annual_rate,
        input.term_years,
        periods_per_year,
    )?;
    let schedule = build_schedule_for(input)?;

    if rate.is_zero() {
        warnings.push("Zero interest rate: payment is principal / n (even amortization)".into());
    }

    let final_balance = schedule.final_balance();
    if !final_balance.is_zero() {
        log::warn!("schedule closes with residual balance {final_balance}");
        warnings.push(format!(
            "Final balance of {final_balance} reflects accumulated per-period rounding"
        ));
    }

    let total_interest = schedule.total_interest()?;
    let total_principal = schedule.total_principal()?;
    let total_paid = total_interest.checked_add(total_principal).ok_or_else(|| {
        AmortizationError::FinancialImpossibility("total paid exceeds decimal range".into())
    })?;
    let summary = AmortizationSummary {
        payment: round_cents(payment),
        total_interest,
        total_principal,
        total_paid,
        final_balance,
    };

    let output = AmortizationOutput {
        frequency: input.frequency,
        periods_per_year,
        total_periods: n,
        periodic_rate: rate,
        payment,
        summary,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(METHODOLOGY, input, warnings, elapsed, output))
}

/// Periodic payment for `input` without building the table.
pub fn calculate_payment(input: &LoanInput) -> AmortizationResult<ComputationOutput<PaymentOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.validate()?;

    let periods_per_year = input.periods_per_year();
    let rate = periodic_rate(input.annual_rate, periods_per_year)?;
    let payment = compute_payment(
        input.principal,
        input.annual_rate,
        input.term_years,
        periods_per_year,
    )?;

    if rate.is_zero() {
        warnings.push("Zero interest rate: payment is principal / n (even amortization)".into());
    }

    let output = PaymentOutput {
        frequency: input.frequency,
        periods_per_year,
        total_periods: total_periods(input.term_years, periods_per_year)?,
        periodic_rate: rate,
        payment,
        payment_rounded: round_cents(payment),
        lifetime_interest: lifetime_interest(input)?,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(METHODOLOGY, input, warnings, elapsed, output))
}

/// Total interest cost over the life of the loan at the unrounded payment.
pub fn lifetime_interest(input: &LoanInput) -> AmortizationResult<Money> {
    input.validate()?;
    let n = total_periods(input.term_years, input.periods_per_year())?;
    let payment = compute_payment(
        input.principal,
        input.annual_rate,
        input.term_years,
        input.periods_per_year(),
    )?;
    payment
        .checked_mul(Decimal::from(n))
        .and_then(|paid| paid.checked_sub(input.principal))
        .map(round_cents)
        .ok_or_else(|| {
            AmortizationError::FinancialImpossibility(
                "lifetime repayments exceed decimal range".into(),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn standard_mortgage() -> LoanInput {
        LoanInput {
            principal: dec!(100000),
            annual_rate: dec!(0.05),
            term_years: 20,
            frequency: RepaymentFrequency::Monthly,
        }
    }

    #[test]
    fn test_amortize_summary() {
        let out = amortize(&standard_mortgage()).unwrap();
        let r = &out.result;
        assert_eq!(r.periods_per_year, 12);
        assert_eq!(r.total_periods, 240);
        assert_eq!(r.summary.payment, dec!(659.96));
        assert_eq!(r.schedule.len(), 241);
        assert_eq!(r.summary.final_balance, dec!(0.05));
        assert_eq!(
            r.summary.total_paid,
            r.summary.total_interest + r.summary.total_principal
        );
        assert_eq!(r.summary.total_interest, dec!(58389.41));
        assert_eq!(r.summary.total_principal, dec!(99999.95));
        // Principal retired plus residual balance recovers the loan amount
        assert_eq!(r.summary.total_principal + r.summary.final_balance, dec!(100000));
    }

    #[test]
    fn test_amortize_warns_on_rounding_residual() {
        let out = amortize(&standard_mortgage()).unwrap();
        assert!(out
            .warnings
            .iter()
            .any(|w| w.contains("Final balance of 0.05")));
        assert_eq!(out.methodology, METHODOLOGY);
        assert_eq!(out.assumptions["term_years"], 20);
    }

    #[test]
    fn test_amortize_zero_rate_warning() {
        let input = LoanInput {
            principal: dec!(12000),
            annual_rate: Decimal::ZERO,
            term_years: 1,
            frequency: RepaymentFrequency::Monthly,
        };
        let out = amortize(&input).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].starts_with("Zero interest rate"));
        assert_eq!(out.result.summary.total_interest, Decimal::ZERO);
        assert_eq!(out.result.summary.total_paid, dec!(12000));
    }

    #[test]
    fn test_calculate_payment() {
        let out = calculate_payment(&standard_mortgage()).unwrap();
        assert_eq!(out.result.payment_rounded, dec!(659.96));
        assert_eq!(out.result.total_periods, 240);
        assert_eq!(out.result.lifetime_interest, dec!(58389.38));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_lifetime_interest() {
        // 659.9557392... * 240 - 100000 = 58389.377...
        let interest = lifetime_interest(&standard_mortgage()).unwrap();
        assert_eq!(interest, dec!(58389.38));
    }

    #[test]
    fn test_totals_beyond_decimal_range_are_errors() {
        let input = LoanInput {
            principal: dec!(10000000000000000000000000000),
            annual_rate: dec!(0.5),
            term_years: 30,
            frequency: RepaymentFrequency::Monthly,
        };
        assert!(matches!(
            amortize(&input),
            Err(AmortizationError::FinancialImpossibility(_))
        ));
        assert!(matches!(
            lifetime_interest(&input),
            Err(AmortizationError::FinancialImpossibility(_))
        ));
        assert!(matches!(
            calculate_payment(&input),
            Err(AmortizationError::FinancialImpossibility(_))
        ));
    }

    #[test]
    fn test_invalid_input_produces_no_output() {
        let mut input = standard_mortgage();
        input.term_years = 0;
        assert!(amortize(&input).is_err());
        assert!(calculate_payment(&input).is_err());
    }
}
