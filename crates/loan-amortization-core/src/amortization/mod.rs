//! Level-payment loan amortization.
//!
//! The computational core is two pure functions: [`payment::compute_payment`]
//! for the fixed periodic instalment and [`schedule::build_schedule`] for the
//! period-by-period table. Everything else in this module wraps those two:
//! the reporting envelope, the balance chart series and the form controller
//! that rebuilds the view whenever a field changes.

pub mod frequency;
pub mod payment;
pub mod report;
pub mod schedule;

#[cfg(feature = "chart")]
pub mod chart;

#[cfg(feature = "controller")]
pub mod controller;

use rust_decimal::{Decimal, RoundingStrategy};

pub use frequency::RepaymentFrequency;
pub use schedule::{build_schedule, LoanInput, PeriodRow, Schedule};

/// Round a currency amount to cents, ties to even, always carrying two
/// decimal places so tables line up.
pub fn round_cents(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(2);
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_cents_ties_to_even() {
        assert_eq!(round_cents(dec!(2.665)), dec!(2.66));
        assert_eq!(round_cents(dec!(2.675)), dec!(2.68));
        assert_eq!(round_cents(dec!(-1.235)), dec!(-1.24));
    }

    #[test]
    fn test_round_cents_pads_scale() {
        assert_eq!(round_cents(dec!(1000)).to_string(), "1000.00");
        assert_eq!(round_cents(dec!(416.666666)).to_string(), "416.67");
    }
}
