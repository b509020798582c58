//! Classification rulesets.

use rust_decimal::Decimal;

use super::types::ThresholdStatus;

/// Classifies `value` against `target` using an amber floor fraction.
///
/// - target of 0: always on target
/// - ratio >= 1: on target
/// - amber floor <= ratio < 1: watch
/// - ratio < amber floor: below target
#[must_use]
pub fn classify(value: Decimal, target: Decimal, amber_floor_fraction: Decimal) -> ThresholdStatus {
    if target.is_zero() {
        return ThresholdStatus::OnTarget;
    }

    let ratio = value / target;
    if ratio >= Decimal::ONE {
        ThresholdStatus::OnTarget
    } else if ratio >= amber_floor_fraction {
        ThresholdStatus::Watch
    } else {
        ThresholdStatus::BelowTarget
    }
}

/// Classifies discount impact measured in equivalent boxes lost.
///
/// <= 1 on target, (1, 3] watch, > 3 below target.
#[must_use]
pub fn classify_discount(equivalent_boxes_lost: Decimal) -> ThresholdStatus {
    if equivalent_boxes_lost <= Decimal::ONE {
        ThresholdStatus::OnTarget
    } else if equivalent_boxes_lost <= Decimal::from(3) {
        ThresholdStatus::Watch
    } else {
        ThresholdStatus::BelowTarget
    }
}

/// Classifies cost compliance (0-100).
///
/// >= 95 on target, [90, 95) watch, < 90 below target.
#[must_use]
pub fn classify_cost_compliance(pct: Decimal) -> ThresholdStatus {
    if pct >= Decimal::from(95) {
        ThresholdStatus::OnTarget
    } else if pct >= Decimal::from(90) {
        ThresholdStatus::Watch
    } else {
        ThresholdStatus::BelowTarget
    }
}

/// Classifies a rework rate (percent of boxes built).
///
/// <= 3 on target, (3, 5] watch, > 5 below target.
#[must_use]
pub fn classify_quality(rework_rate_pct: Decimal) -> ThresholdStatus {
    if rework_rate_pct <= Decimal::from(3) {
        ThresholdStatus::OnTarget
    } else if rework_rate_pct <= Decimal::from(5) {
        ThresholdStatus::Watch
    } else {
        ThresholdStatus::BelowTarget
    }
}
