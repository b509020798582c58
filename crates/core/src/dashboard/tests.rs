//! Scenario and property-based tests for dashboard aggregation.

use chrono::NaiveDate;
use forgeboard_shared::types::{OrderId, ProductionBatchId};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::DashboardError;
use super::service::DashboardService;
use crate::fiscal::FiscalError;
use crate::records::{Order, OverCostReason, ProductionBatch};
use crate::settings::Settings;
use crate::status::ThresholdStatus;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[allow(clippy::too_many_arguments)]
fn order(
    id: i64,
    on: NaiveDate,
    boxes_qty: i32,
    rrp: Decimal,
    net: Decimal,
    cost: Decimal,
    install: Decimal,
    extras: Decimal,
) -> Order {
    Order {
        id: OrderId::new(id),
        date: on,
        reference: None,
        sales_rep_id: None,
        boxes_qty,
        rrp_total: rrp,
        net_total: net,
        build_cost_total: cost,
        install_revenue: install,
        extras_revenue: extras,
        notes: None,
        created_at: None,
        updated_at: None,
    }
}

fn batch(
    id: i64,
    on: NaiveDate,
    built: i32,
    over: i32,
    reasons: &[(&str, i32)],
    rework: i32,
) -> ProductionBatch {
    ProductionBatch {
        id: ProductionBatchId::new(id),
        date: on,
        boxes_built: built,
        boxes_over_cost: over,
        over_cost_reasons: reasons
            .iter()
            .map(|(reason, boxes)| OverCostReason {
                reason: (*reason).to_string(),
                boxes: *boxes,
            })
            .collect(),
        rework_boxes: rework,
        notes: None,
        created_at: None,
        updated_at: None,
    }
}

fn sample_orders() -> Vec<Order> {
    vec![
        order(1, date(2026, 3, 5), 2, dec!(2800), dec!(2600), dec!(1400), dec!(300), dec!(100)),
        order(2, date(2026, 3, 20), 3, dec!(4200), dec!(4200), dec!(2100), dec!(0), dec!(0)),
        order(3, date(2026, 2, 27), 5, dec!(7000), dec!(7000), dec!(3500), dec!(0), dec!(0)),
        order(4, date(2026, 3, 2), 1, dec!(1400), dec!(1300), dec!(700), dec!(0), dec!(0)),
        order(5, date(2026, 4, 2), 4, dec!(5600), dec!(5600), dec!(2800), dec!(500), dec!(0)),
    ]
}

fn sample_batches() -> Vec<ProductionBatch> {
    vec![
        batch(1, date(2026, 3, 10), 20, 2, &[("Steel price", 2)], 1),
        batch(2, date(2026, 3, 25), 10, 0, &[], 0),
        batch(3, date(2026, 2, 20), 8, 8, &[("Rush freight", 8)], 4),
    ]
}

#[test]
fn test_sales_bundle_for_march() {
    let metrics =
        DashboardService::aggregate_sales(&sample_orders(), &Settings::default(), "2025/26", "March")
            .unwrap();

    assert_eq!(metrics.period.start_date, date(2026, 3, 1));
    assert_eq!(metrics.period.end_date, date(2026, 3, 31));
    assert_eq!(metrics.period.monthly_box_target, 20);

    assert_eq!(metrics.boxes_sold, 6);
    assert_eq!(metrics.baseline_actual, dec!(3900));
    assert_eq!(metrics.baseline_target, dec!(14000));
    assert_eq!(metrics.discount.impact_total, dec!(300));
    assert_eq!(metrics.discount.boxes_lost_total.round_dp(4), dec!(0.4286));
    assert_eq!(metrics.discount.average_discount_pct.round_dp(4), dec!(3.5714));

    assert_eq!(metrics.mix.net_total, dec!(8100));
    assert_eq!(metrics.mix.install_total, dec!(300));
    assert_eq!(metrics.mix.extras_total, dec!(100));
    assert_eq!(metrics.mix.net_pct.round_dp(2), dec!(95.29));
    assert_eq!(metrics.mix.install_pct.round_dp(2), dec!(3.53));
    assert_eq!(metrics.mix.extras_pct.round_dp(2), dec!(1.18));

    assert_eq!(metrics.shape.order_count, 3);
    assert_eq!(metrics.shape.avg_boxes_per_order, dec!(2));
    assert_eq!(metrics.shape.avg_baseline_per_box, dec!(650));
    // Orders 1 and 2 fall in the 28 days ending 31 March; order 4 does not.
    assert_eq!(metrics.shape.rolling_4wk_boxes_per_week, dec!(1.25));

    assert_eq!(metrics.statuses.volume, ThresholdStatus::BelowTarget);
    assert_eq!(metrics.statuses.baseline, ThresholdStatus::BelowTarget);
    assert_eq!(metrics.statuses.discount, ThresholdStatus::OnTarget);
}

#[test]
fn test_sales_bundle_empty_month_uses_fallbacks() {
    let metrics =
        DashboardService::aggregate_sales(&sample_orders(), &Settings::default(), "2025/26", "October")
            .unwrap();

    assert_eq!(metrics.boxes_sold, 0);
    assert_eq!(metrics.discount.average_discount_pct, Decimal::ZERO);
    assert_eq!(metrics.mix.net_pct, Decimal::ZERO);
    assert_eq!(metrics.shape.avg_boxes_per_order, Decimal::ZERO);
    assert_eq!(metrics.shape.avg_baseline_per_box, Decimal::ZERO);
    assert_eq!(metrics.shape.rolling_4wk_boxes_per_week, Decimal::ZERO);
}

#[test]
fn test_sales_zero_floor_and_missing_target() {
    let mut settings = Settings {
        baseline_floor_per_box: Decimal::ZERO,
        ..Settings::default()
    };
    settings.monthly_box_targets.clear();

    let metrics =
        DashboardService::aggregate_sales(&sample_orders(), &settings, "2025/26", "March").unwrap();

    assert_eq!(metrics.discount.boxes_lost_total, Decimal::ZERO);
    assert_eq!(metrics.baseline_target, Decimal::ZERO);
    assert_eq!(metrics.statuses.volume, ThresholdStatus::OnTarget);
    assert_eq!(metrics.statuses.baseline, ThresholdStatus::OnTarget);
}

#[test]
fn test_production_bundle_for_march() {
    let metrics = DashboardService::aggregate_production(
        &sample_batches(),
        &sample_orders(),
        &Settings::default(),
        "2025/26",
        "march",
    )
    .unwrap();

    assert_eq!(metrics.period.month, "March");
    assert_eq!(metrics.boxes_built, 30);
    assert_eq!(metrics.boxes_over_cost, 2);
    assert_eq!(metrics.rework_boxes, 1);
    assert_eq!(metrics.cost_compliance_pct.round_dp(2), dec!(93.33));
    assert_eq!(metrics.rework_rate_pct.round_dp(2), dec!(3.33));
    assert_eq!(metrics.rolling_4wk_built_per_week, dec!(7.5));

    // Boxes ordered up to 31 March (2 + 3 + 5 + 1) minus March output.
    assert_eq!(metrics.backlog, 11 - 30);

    assert_eq!(metrics.installs.installed_boxes, 2);
    assert_eq!(metrics.installs.installs_per_week, dec!(0.5));
    assert_eq!(metrics.installs.install_shape_pct.round_dp(2), dec!(6.67));
    assert_eq!(metrics.installs.capacity_per_week, 10);

    assert_eq!(metrics.cost_leakage.len(), 1);
    assert_eq!(metrics.cost_leakage[0].reason, "Steel price");
    assert_eq!(metrics.cost_leakage[0].boxes, 2);
    assert_eq!(metrics.cost_leakage[0].occurrences, 1);

    assert_eq!(metrics.statuses.volume, ThresholdStatus::OnTarget);
    assert_eq!(metrics.statuses.cost_compliance, ThresholdStatus::Watch);
    assert_eq!(metrics.statuses.quality, ThresholdStatus::Watch);
    assert_eq!(metrics.statuses.install_pace, ThresholdStatus::BelowTarget);
}

#[test]
fn test_cost_compliance_boundary_is_watch() {
    let batches = vec![batch(1, date(2025, 8, 12), 20, 2, &[], 0)];
    let metrics =
        DashboardService::aggregate_production(&batches, &[], &Settings::default(), "2025/26", "August")
            .unwrap();

    assert_eq!(metrics.cost_compliance_pct, dec!(90));
    assert_eq!(metrics.statuses.cost_compliance, ThresholdStatus::Watch);
}

#[test]
fn test_no_production_is_fully_compliant() {
    let metrics =
        DashboardService::aggregate_production(&[], &[], &Settings::default(), "2025/26", "August")
            .unwrap();

    assert_eq!(metrics.cost_compliance_pct, dec!(100));
    assert_eq!(metrics.rework_rate_pct, Decimal::ZERO);
    assert_eq!(metrics.installs.install_shape_pct, Decimal::ZERO);
    assert_eq!(metrics.statuses.cost_compliance, ThresholdStatus::OnTarget);
    assert_eq!(metrics.statuses.quality, ThresholdStatus::OnTarget);
    assert!(metrics.cost_leakage.is_empty());
}

#[test]
fn test_leakage_top_five_with_name_tiebreak() {
    let on = date(2025, 9, 3);
    let batches = vec![
        batch(1, on, 40, 20, &[("Timber", 5), ("Glass", 3), ("Paint", 1)], 0),
        batch(2, on, 40, 20, &[("Timber", 2), ("Hinges", 3), ("Labour", 4)], 0),
        batch(3, on, 40, 20, &[("Fixings", 1), ("Glass", 1)], 0),
    ];

    let metrics =
        DashboardService::aggregate_production(&batches, &[], &Settings::default(), "2025/26", "September")
            .unwrap();
    let names: Vec<&str> = metrics
        .cost_leakage
        .iter()
        .map(|r| r.reason.as_str())
        .collect();

    assert_eq!(names, vec!["Timber", "Glass", "Labour", "Hinges", "Fixings"]);
    assert_eq!(metrics.cost_leakage[0].boxes, 7);
    assert_eq!(metrics.cost_leakage[0].occurrences, 2);
    assert_eq!(metrics.cost_leakage[1].boxes, 4);
    assert_eq!(metrics.cost_leakage[1].occurrences, 2);
}

#[test]
fn test_unknown_period_rejected() {
    let err = DashboardService::aggregate_sales(&[], &Settings::default(), "2025/26", "Smarch")
        .unwrap_err();
    assert_eq!(
        err,
        DashboardError::Period(FiscalError::UnknownMonth("Smarch".to_string()))
    );

    let err = DashboardService::aggregate_production(&[], &[], &Settings::default(), "25/26", "May")
        .unwrap_err();
    assert!(matches!(err, DashboardError::Period(FiscalError::InvalidLabel(_))));
}

#[test]
fn test_period_label_is_canonical() {
    let metrics =
        DashboardService::aggregate_sales(&[], &Settings::default(), " 2025/26 ", "march").unwrap();
    assert_eq!(metrics.period.fiscal_year, "2025/26");
    assert_eq!(metrics.period.month, "March");

    assert!(
        DashboardService::aggregate_sales(&[], &Settings::default(), "02025/26", "March").is_err()
    );
}

/// Orders dated within fiscal year 2025/26 (July 2025 - June 2026).
fn order_strategy() -> impl Strategy<Value = Order> {
    (0i64..365, 1i32..10, 1_000i64..10_000, 0i64..1_000, 0i64..500, 0i64..300).prop_map(
        |(offset, qty, rrp, discount, install, extras)| {
            let rrp = Decimal::from(rrp);
            order(
                offset,
                date(2025, 7, 1) + chrono::Duration::days(offset),
                qty,
                rrp,
                rrp - Decimal::from(discount),
                rrp / Decimal::TWO,
                Decimal::from(install),
                Decimal::from(extras),
            )
        },
    )
}

fn month_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(crate::fiscal::MONTH_NAMES.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Aggregating the same inputs twice yields identical bundles.
    #[test]
    fn prop_sales_aggregation_is_idempotent(
        orders in prop::collection::vec(order_strategy(), 0..40),
        month in month_strategy(),
    ) {
        let settings = Settings::default();
        let first = DashboardService::aggregate_sales(&orders, &settings, "2025/26", month).unwrap();
        let second = DashboardService::aggregate_sales(&orders, &settings, "2025/26", month).unwrap();
        prop_assert_eq!(first, second);
    }

    /// The months of one fiscal year partition its orders.
    #[test]
    fn prop_months_partition_boxes_sold(
        orders in prop::collection::vec(order_strategy(), 0..40),
    ) {
        let settings = Settings::default();
        let total: i64 = crate::fiscal::MONTH_NAMES
            .iter()
            .map(|m| {
                DashboardService::aggregate_sales(&orders, &settings, "2025/26", m)
                    .unwrap()
                    .boxes_sold
            })
            .sum();
        let expected: i64 = orders.iter().map(|o| i64::from(o.boxes_qty)).sum();
        prop_assert_eq!(total, expected);
    }

    /// Revenue mix percentages sum to 100 whenever there is revenue.
    #[test]
    fn prop_revenue_mix_sums_to_hundred(
        orders in prop::collection::vec(order_strategy(), 1..40),
        month in month_strategy(),
    ) {
        let metrics = DashboardService::aggregate_sales(&orders, &Settings::default(), "2025/26", month)
            .unwrap();
        if metrics.shape.order_count > 0 {
            let sum = metrics.mix.net_pct + metrics.mix.install_pct + metrics.mix.extras_pct;
            prop_assert_eq!(sum.round_dp(6), Decimal::ONE_HUNDRED);
        }
    }
}
