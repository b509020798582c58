//! Dashboard data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::status::ThresholdStatus;

/// The fiscal month a bundle was computed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodInfo {
    /// Fiscal year label, e.g. "2025/26".
    pub fiscal_year: String,
    /// Fiscal month name.
    pub month: String,
    /// First day of the month.
    pub start_date: NaiveDate,
    /// Last day of the month.
    pub end_date: NaiveDate,
    /// Box target for the month.
    pub monthly_box_target: i32,
}

/// Sales dashboard bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesMetrics {
    /// Period info.
    pub period: PeriodInfo,
    /// Boxes sold in the month.
    pub boxes_sold: i64,
    /// Sum of actual baseline contribution.
    pub baseline_actual: Decimal,
    /// Monthly box target times baseline floor.
    pub baseline_target: Decimal,
    /// Discount figures.
    pub discount: DiscountSummary,
    /// Observed revenue mix.
    pub mix: RevenueMix,
    /// Order shape and momentum.
    pub shape: SalesShape,
    /// Threshold statuses.
    pub statuses: SalesStatuses,
}

/// Discount totals for the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountSummary {
    /// Sum of per-order discount impact.
    pub impact_total: Decimal,
    /// Impact total in baseline-floor boxes.
    pub boxes_lost_total: Decimal,
    /// Impact total as a percentage of RRP.
    pub average_discount_pct: Decimal,
}

/// Split of revenue between product, installs and extras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueMix {
    /// Net product revenue.
    pub net_total: Decimal,
    /// Install revenue.
    pub install_total: Decimal,
    /// Extras revenue.
    pub extras_total: Decimal,
    /// Net share of the combined total.
    pub net_pct: Decimal,
    /// Install share.
    pub install_pct: Decimal,
    /// Extras share.
    pub extras_pct: Decimal,
}

/// Order shape and momentum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesShape {
    /// Orders in the month.
    pub order_count: usize,
    /// Boxes per order.
    pub avg_boxes_per_order: Decimal,
    /// Actual baseline per box sold.
    pub avg_baseline_per_box: Decimal,
    /// Boxes per week over the 28 days ending at month end (all orders).
    pub rolling_4wk_boxes_per_week: Decimal,
}

/// Sales statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesStatuses {
    /// Boxes sold against the monthly target.
    pub volume: ThresholdStatus,
    /// Baseline actual against baseline target.
    pub baseline: ThresholdStatus,
    /// Discount boxes lost.
    pub discount: ThresholdStatus,
}

/// Production dashboard bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionMetrics {
    /// Period info.
    pub period: PeriodInfo,
    /// Boxes built in the month.
    pub boxes_built: i64,
    /// Boxes over cost in the month.
    pub boxes_over_cost: i64,
    /// Boxes reworked in the month.
    pub rework_boxes: i64,
    /// Share of built boxes within cost (100 when nothing was built).
    pub cost_compliance_pct: Decimal,
    /// Reworked boxes as a percentage of built.
    pub rework_rate_pct: Decimal,
    /// Top over-cost reasons by boxes.
    pub cost_leakage: Vec<CostLeakageReason>,
    /// Built boxes per week over the 28 days ending at month end (all batches).
    pub rolling_4wk_built_per_week: Decimal,
    /// Boxes ordered up to month end minus boxes built this month.
    pub backlog: i64,
    /// Install pace.
    pub installs: InstallSummary,
    /// Threshold statuses.
    pub statuses: ProductionStatuses,
}

/// One ranked over-cost reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLeakageReason {
    /// Reason name.
    pub reason: String,
    /// Boxes tagged with the reason.
    pub boxes: i64,
    /// Number of tags.
    pub occurrences: i64,
}

/// Install figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallSummary {
    /// Boxes on in-month orders carrying install revenue.
    pub installed_boxes: i64,
    /// Install boxes per week over the trailing 28 days (all orders).
    pub installs_per_week: Decimal,
    /// Installed boxes as a percentage of boxes built.
    pub install_shape_pct: Decimal,
    /// Weekly install capacity from settings.
    pub capacity_per_week: i32,
}

/// Production statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionStatuses {
    /// Boxes built against the monthly target.
    pub volume: ThresholdStatus,
    /// Cost compliance.
    pub cost_compliance: ThresholdStatus,
    /// Rework rate.
    pub quality: ThresholdStatus,
    /// Installs per week against capacity.
    pub install_pace: ThresholdStatus,
}
