//! Per-order financial metrics.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::records::Order;

/// Contribution and discount figures for a single order.
///
/// Negative values are kept as-is; classification decides what they mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderMetrics {
    /// RRP total minus build cost.
    pub expected_baseline: Decimal,
    /// Net total minus build cost.
    pub actual_baseline: Decimal,
    /// Actual baseline per box sold.
    pub contribution_per_box: Decimal,
    /// Expected minus actual baseline (equals RRP minus net).
    pub discount_impact: Decimal,
    /// Discount impact expressed in baseline-floor boxes.
    pub discount_boxes_lost: Decimal,
}

impl OrderMetrics {
    /// Calculates the metrics of `order` against the per-box baseline floor.
    ///
    /// A non-positive box quantity counts as one box; a zero floor yields
    /// zero boxes lost.
    #[must_use]
    pub fn for_order(order: &Order, baseline_floor_per_box: Decimal) -> Self {
        let expected_baseline = order.rrp_total - order.build_cost_total;
        let actual_baseline = order.net_total - order.build_cost_total;
        let boxes = Decimal::from(order.boxes_qty.max(1));
        let discount_impact = expected_baseline - actual_baseline;

        Self {
            expected_baseline,
            actual_baseline,
            contribution_per_box: actual_baseline / boxes,
            discount_impact,
            discount_boxes_lost: boxes_lost(discount_impact, baseline_floor_per_box),
        }
    }
}

/// Converts a discount amount into baseline-floor boxes (0 when the floor is 0).
#[must_use]
pub fn boxes_lost(discount_impact: Decimal, baseline_floor_per_box: Decimal) -> Decimal {
    if baseline_floor_per_box.is_zero() {
        Decimal::ZERO
    } else {
        discount_impact / baseline_floor_per_box
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use forgeboard_shared::types::OrderId;
    use rust_decimal_macros::dec;

    fn order(boxes_qty: i32, rrp: Decimal, net: Decimal, cost: Decimal) -> Order {
        Order {
            id: OrderId::new(1),
            date: NaiveDate::from_ymd_opt(2025, 8, 4).unwrap(),
            reference: None,
            sales_rep_id: None,
            boxes_qty,
            rrp_total: rrp,
            net_total: net,
            build_cost_total: cost,
            install_revenue: Decimal::ZERO,
            extras_revenue: Decimal::ZERO,
            notes: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_two_box_order_scenario() {
        let m = OrderMetrics::for_order(&order(2, dec!(2800), dec!(2600), dec!(1400)), dec!(700));

        assert_eq!(m.expected_baseline, dec!(1400));
        assert_eq!(m.actual_baseline, dec!(1200));
        assert_eq!(m.contribution_per_box, dec!(600));
        assert_eq!(m.discount_impact, dec!(200));
        assert_eq!(m.discount_boxes_lost.round_dp(4), dec!(0.2857));
    }

    #[test]
    fn test_zero_boxes_treated_as_one() {
        let m = OrderMetrics::for_order(&order(0, dec!(1000), dec!(900), dec!(500)), dec!(700));
        assert_eq!(m.contribution_per_box, dec!(400));

        let m = OrderMetrics::for_order(&order(-3, dec!(1000), dec!(900), dec!(500)), dec!(700));
        assert_eq!(m.contribution_per_box, dec!(400));
    }

    #[test]
    fn test_zero_floor_means_no_boxes_lost() {
        let m = OrderMetrics::for_order(&order(1, dec!(1000), dec!(800), dec!(500)), dec!(0));
        assert_eq!(m.discount_impact, dec!(200));
        assert_eq!(m.discount_boxes_lost, dec!(0));
    }

    #[test]
    fn test_net_above_rrp_gives_negative_impact() {
        let m = OrderMetrics::for_order(&order(1, dec!(1000), dec!(1100), dec!(500)), dec!(500));
        assert_eq!(m.discount_impact, dec!(-100));
        assert_eq!(m.discount_boxes_lost, dec!(-0.2));
    }

    #[test]
    fn test_loss_making_order_not_clamped() {
        let m = OrderMetrics::for_order(&order(2, dec!(1000), dec!(800), dec!(1200)), dec!(700));
        assert_eq!(m.actual_baseline, dec!(-400));
        assert_eq!(m.contribution_per_box, dec!(-200));
    }
}
