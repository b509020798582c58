//! Property-based tests for threshold classification.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::classify::classify;
use super::types::ThresholdStatus;

/// Amounts from -10,000.00 to 1,000,000.00.
fn amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Positive targets from 0.01 to 1,000,000.00.
fn positive_target() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Amber fractions strictly between 0 and 1.
fn amber_fraction() -> impl Strategy<Value = Decimal> {
    (1i64..100).prop_map(|pct| Decimal::new(pct, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* positive target and amber fraction, raising the value never
    /// worsens the status.
    #[test]
    fn prop_classify_monotonic_in_value(
        a in amount(),
        b in amount(),
        target in positive_target(),
        amber in amber_fraction(),
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(classify(low, target, amber) <= classify(high, target, amber));
    }

    /// *For any* value and fraction, a zero target is on target.
    #[test]
    fn prop_zero_target_on_target(
        value in amount(),
        amber in amber_fraction(),
    ) {
        prop_assert_eq!(classify(value, Decimal::ZERO, amber), ThresholdStatus::OnTarget);
    }

    /// *For any* positive target, meeting it exactly is on target.
    #[test]
    fn prop_meeting_target_is_on_target(
        target in positive_target(),
        amber in amber_fraction(),
    ) {
        prop_assert_eq!(classify(target, target, amber), ThresholdStatus::OnTarget);
    }
}
