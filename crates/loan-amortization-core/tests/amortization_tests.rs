use loan_amortization_core::amortization::payment::compute_payment;
use loan_amortization_core::amortization::{build_schedule, round_cents, RepaymentFrequency};
use loan_amortization_core::AmortizationError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Shape of the schedule
// ===========================================================================

#[test]
fn test_row_count_for_every_frequency() {
    for frequency in RepaymentFrequency::ALL {
        for term in [1u32, 5, 30] {
            let schedule = build_schedule(dec!(150000), dec!(0.045), term, frequency).unwrap();
            let expected = (term * frequency.periods_per_year() + 1) as usize;
            assert_eq!(schedule.len(), expected, "{frequency} over {term} years");
        }
    }
}

#[test]
fn test_row_zero_is_opening_state() {
    for rate in [Decimal::ZERO, dec!(0.03), dec!(0.18)] {
        let schedule = build_schedule(dec!(42000), rate, 4, RepaymentFrequency::Weekly).unwrap();
        let row = schedule.rows()[0];
        assert_eq!(row.period, 0);
        assert_eq!(row.interest, Decimal::ZERO);
        assert_eq!(row.principal, Decimal::ZERO);
        assert_eq!(row.balance, dec!(42000));
    }
}

#[test]
fn test_periods_are_consecutive() {
    let schedule =
        build_schedule(dec!(20000), dec!(0.07), 2, RepaymentFrequency::Fortnightly).unwrap();
    for (i, row) in schedule.iter().enumerate() {
        assert_eq!(row.period as usize, i);
    }
}

// ===========================================================================
// Reference scenarios
// ===========================================================================

#[test]
fn test_standard_mortgage_scenario() {
    let payment = compute_payment(dec!(100000), dec!(0.05), 20, 12).unwrap();
    assert_eq!(round_cents(payment), dec!(659.96));

    let schedule =
        build_schedule(dec!(100000), dec!(0.05), 20, RepaymentFrequency::Monthly).unwrap();
    assert_eq!(schedule.len(), 241);

    let rows = schedule.rows();
    assert_eq!(rows[1].interest, dec!(416.67));
    assert_eq!(rows[1].principal, dec!(243.29));
    assert_eq!(rows[1].balance, dec!(99756.71));

    // Principal comes from the unrounded accrual: 659.9557 - 415.6529 = 244.3028
    assert_eq!(rows[2].interest, dec!(415.65));
    assert_eq!(rows[2].principal, dec!(244.30));
    assert_eq!(rows[2].balance, dec!(99512.41));

    let last = rows[240];
    assert_eq!(last.period, 240);
    assert_eq!(last.interest, dec!(2.74));
    assert_eq!(last.principal, dec!(657.22));
    // Cents rounding of the running balance leaves a small residual
    assert_eq!(last.balance, dec!(0.05));
}

#[test]
fn test_zero_rate_scenario() {
    let payment = compute_payment(dec!(12000), Decimal::ZERO, 1, 12).unwrap();
    assert_eq!(payment, dec!(1000));

    let schedule = build_schedule(dec!(12000), Decimal::ZERO, 1, RepaymentFrequency::Monthly)
        .unwrap();
    assert_eq!(schedule.len(), 13);
    for row in schedule.iter().skip(1) {
        assert_eq!(row.interest, Decimal::ZERO);
        assert_eq!(row.principal, dec!(1000.00));
    }
    assert_eq!(schedule.final_balance(), dec!(0.00));
}

#[test]
fn test_zero_rate_uneven_split_stays_within_rounding() {
    let schedule =
        build_schedule(dec!(1000), Decimal::ZERO, 1, RepaymentFrequency::Fortnightly).unwrap();
    let even = dec!(1000) / dec!(26);
    for row in schedule.iter().skip(1) {
        assert_eq!(row.interest, Decimal::ZERO);
        assert!((row.principal - even).abs() <= dec!(0.005));
    }
    assert!(schedule.final_balance().abs() <= dec!(0.13));
}

#[test]
fn test_long_schedules_close_near_zero() {
    let cases = [
        (dec!(250000), dec!(0.065), 30, RepaymentFrequency::Monthly, dec!(0.35)),
        (dec!(250000), dec!(0.065), 30, RepaymentFrequency::Fortnightly, dec!(-0.47)),
        (dec!(250000), dec!(0.065), 30, RepaymentFrequency::Weekly, dec!(0.13)),
        (dec!(100000), dec!(0.05), 1, RepaymentFrequency::Monthly, dec!(-0.01)),
    ];
    for (principal, rate, term, frequency, expected) in cases {
        let schedule = build_schedule(principal, rate, term, frequency).unwrap();
        assert_eq!(schedule.final_balance(), expected, "{principal} @ {rate} {frequency}");
    }
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_balance_non_increasing_with_interest() {
    for frequency in RepaymentFrequency::ALL {
        let schedule = build_schedule(dec!(300000), dec!(0.045), 25, frequency).unwrap();
        for pair in schedule.rows().windows(2) {
            assert!(
                pair[1].balance <= pair[0].balance,
                "balance rose at period {} ({frequency})",
                pair[1].period
            );
        }
    }
}

#[test]
fn test_final_balance_small_relative_to_principal() {
    for frequency in RepaymentFrequency::ALL {
        let schedule = build_schedule(dec!(300000), dec!(0.045), 25, frequency).unwrap();
        let periods = Decimal::from(schedule.repayment_periods() as u64);
        assert!(schedule.final_balance().abs() <= periods * dec!(0.005));
    }
}

#[test]
fn test_interest_share_declines_over_time() {
    let schedule =
        build_schedule(dec!(100000), dec!(0.05), 20, RepaymentFrequency::Monthly).unwrap();
    let rows = schedule.rows();
    assert!(rows[1].interest > rows[120].interest);
    assert!(rows[120].interest > rows[240].interest);
    assert!(rows[1].principal < rows[240].principal);
}

#[test]
fn test_idempotent() {
    let a = build_schedule(dec!(87500), dec!(0.0725), 15, RepaymentFrequency::Weekly).unwrap();
    let b = build_schedule(dec!(87500), dec!(0.0725), 15, RepaymentFrequency::Weekly).unwrap();
    assert_eq!(a, b);
}

// ===========================================================================
// Invalid input
// ===========================================================================

#[test]
fn test_zero_term_is_invalid() {
    let err = build_schedule(dec!(100000), dec!(0.05), 0, RepaymentFrequency::Monthly).unwrap_err();
    assert!(matches!(err, AmortizationError::InvalidInput { .. }));
}

#[test]
fn test_unknown_frequency_is_invalid() {
    let err = "Daily".parse::<RepaymentFrequency>().unwrap_err();
    assert!(matches!(
        err,
        AmortizationError::InvalidInput { ref field, .. } if field == "frequency"
    ));
}

#[test]
fn test_non_positive_principal_is_invalid() {
    for principal in [Decimal::ZERO, dec!(-100)] {
        let err =
            build_schedule(principal, dec!(0.05), 10, RepaymentFrequency::Monthly).unwrap_err();
        assert!(matches!(err, AmortizationError::InvalidInput { .. }));
    }
}

#[test]
fn test_error_message_is_human_readable() {
    let err = build_schedule(dec!(100000), dec!(0.05), 0, RepaymentFrequency::Monthly).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid input: term_years — Loan term must be at least one year"
    );
}
