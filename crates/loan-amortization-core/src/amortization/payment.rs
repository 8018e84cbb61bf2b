use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::AmortizationError;
use crate::types::{Money, Rate};
use crate::AmortizationResult;

/// Annual rate divided evenly across the repayment periods of one year.
pub fn periodic_rate(annual_rate: Rate, periods_per_year: u32) -> AmortizationResult<Rate> {
    if periods_per_year == 0 {
        return Err(AmortizationError::invalid(
            "periods_per_year",
            "Periods per year must be > 0",
        ));
    }
    if annual_rate < Decimal::ZERO {
        return Err(AmortizationError::invalid(
            "annual_rate",
            "Annual rate must be >= 0 (0.05 = 5%)",
        ));
    }
    Ok(annual_rate / Decimal::from(periods_per_year))
}

/// Longest schedule accepted: one hundred years of weekly repayments.
pub const MAX_TOTAL_PERIODS: u32 = 100 * 52;

/// Total number of repayment periods over the life of the loan.
pub fn total_periods(term_years: u32, periods_per_year: u32) -> AmortizationResult<u32> {
    let n = term_years
        .checked_mul(periods_per_year)
        .filter(|n| *n <= MAX_TOTAL_PERIODS)
        .ok_or_else(|| {
            AmortizationError::invalid(
                "term_years",
                format!("Loan term exceeds {MAX_TOTAL_PERIODS} repayment periods"),
            )
        })?;
    if n == 0 {
        return Err(AmortizationError::invalid(
            "term_years",
            "Loan term must cover at least one repayment period",
        ));
    }
    Ok(n)
}

/// Fixed periodic payment of a level-payment amortizing loan.
///
/// Uses the annuity formula `P * r(1+r)^n / ((1+r)^n - 1)`. A zero rate
/// would make the denominator vanish, so it is handled separately as even
/// amortization `P / n`.
pub fn compute_payment(
    principal: Money,
    annual_rate: Rate,
    term_years: u32,
    periods_per_year: u32,
) -> AmortizationResult<Money> {
    if principal <= Decimal::ZERO {
        return Err(AmortizationError::invalid(
            "principal",
            "Principal must be positive",
        ));
    }

    let rate = periodic_rate(annual_rate, periods_per_year)?;
    let n = total_periods(term_years, periods_per_year)?;

    if rate.is_zero() {
        return Ok(principal / Decimal::from(n));
    }

    let growth = (Decimal::ONE + rate)
        .checked_powu(u64::from(n))
        .ok_or_else(|| {
            AmortizationError::FinancialImpossibility(format!(
                "compound growth (1 + {rate})^{n} exceeds decimal range"
            ))
        })?;

    let annuity_denominator = growth - Decimal::ONE;
    if annuity_denominator.is_zero() {
        return Err(AmortizationError::DivisionByZero {
            context: "payment annuity factor".into(),
        });
    }

    let annuity_factor = rate
        .checked_mul(growth)
        .and_then(|numerator| numerator.checked_div(annuity_denominator))
        .ok_or_else(|| {
            AmortizationError::FinancialImpossibility(
                "payment annuity factor exceeds decimal range".into(),
            )
        })?;

    principal.checked_mul(annuity_factor).ok_or_else(|| {
        AmortizationError::FinancialImpossibility("periodic payment exceeds decimal range".into())
    })
}
