//! Dashboard aggregation service.

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::error::DashboardError;
use super::types::{
    CostLeakageReason, DiscountSummary, InstallSummary, PeriodInfo, ProductionMetrics,
    ProductionStatuses, RevenueMix, SalesMetrics, SalesShape, SalesStatuses,
};
use crate::fiscal::{DateRange, MONTH_NAMES, calendar_month_of, canonical_label};
use crate::metrics::{OrderMetrics, boxes_lost};
use crate::records::{Order, ProductionBatch};
use crate::settings::Settings;
use crate::status::{
    classify, classify_cost_compliance, classify_discount, classify_quality,
};

/// Days in the trailing momentum window.
pub const ROLLING_WINDOW_DAYS: u64 = 28;

/// Weeks in the trailing momentum window.
pub const ROLLING_WINDOW_WEEKS: i64 = 4;

/// Number of over-cost reasons reported.
pub const TOP_LEAKAGE_REASONS: usize = 5;

/// Service computing dashboard bundles.
///
/// Every entry point is a pure function of its inputs.
pub struct DashboardService;

impl DashboardService {
    /// Aggregates the sales dashboard for one fiscal month.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Period` if the fiscal year label, month name
    /// or settings start month cannot be resolved.
    pub fn aggregate_sales(
        orders: &[Order],
        settings: &Settings,
        fiscal_year: &str,
        month: &str,
    ) -> Result<SalesMetrics, DashboardError> {
        let (period, range) = Self::resolve_period(settings, fiscal_year, month)?;
        let floor = settings.baseline_floor_per_box;

        let mut boxes_sold: i64 = 0;
        let mut order_count: usize = 0;
        let mut baseline_actual = Decimal::ZERO;
        let mut discount_impact_total = Decimal::ZERO;
        let mut rrp_total = Decimal::ZERO;
        let mut net_total = Decimal::ZERO;
        let mut install_total = Decimal::ZERO;
        let mut extras_total = Decimal::ZERO;

        for order in orders.iter().filter(|o| range.contains(o.date)) {
            let metrics = OrderMetrics::for_order(order, floor);
            order_count += 1;
            boxes_sold += i64::from(order.boxes_qty);
            baseline_actual += metrics.actual_baseline;
            discount_impact_total += metrics.discount_impact;
            rrp_total += order.rrp_total;
            net_total += order.net_total;
            install_total += order.install_revenue;
            extras_total += order.extras_revenue;
        }

        let discount_boxes_lost_total = boxes_lost(discount_impact_total, floor);
        let baseline_target = Decimal::from(period.monthly_box_target) * floor;
        let mix_total = net_total + install_total + extras_total;
        let boxes_sold_dec = Decimal::from(boxes_sold);

        let window = DateRange::trailing(range.end, ROLLING_WINDOW_DAYS);
        let rolling_boxes: i64 = orders
            .iter()
            .filter(|o| window.contains(o.date))
            .map(|o| i64::from(o.boxes_qty))
            .sum();

        let statuses = SalesStatuses {
            volume: classify(
                boxes_sold_dec,
                Decimal::from(period.monthly_box_target),
                settings.amber_floor_fraction,
            ),
            baseline: classify(
                baseline_actual,
                baseline_target,
                settings.amber_floor_fraction,
            ),
            discount: classify_discount(discount_boxes_lost_total),
        };

        Ok(SalesMetrics {
            period,
            boxes_sold,
            baseline_actual,
            baseline_target,
            discount: DiscountSummary {
                impact_total: discount_impact_total,
                boxes_lost_total: discount_boxes_lost_total,
                average_discount_pct: percent_of(discount_impact_total, rrp_total),
            },
            mix: RevenueMix {
                net_total,
                install_total,
                extras_total,
                net_pct: percent_of(net_total, mix_total),
                install_pct: percent_of(install_total, mix_total),
                extras_pct: percent_of(extras_total, mix_total),
            },
            shape: SalesShape {
                order_count,
                avg_boxes_per_order: ratio(boxes_sold_dec, Decimal::from(order_count)),
                avg_baseline_per_box: ratio(baseline_actual, boxes_sold_dec),
                rolling_4wk_boxes_per_week: per_week(rolling_boxes),
            },
            statuses,
        })
    }

    /// Aggregates the production dashboard for one fiscal month.
    ///
    /// `orders` is the full order set; it feeds the backlog and install
    /// figures.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Period` if the fiscal year label, month name
    /// or settings start month cannot be resolved.
    pub fn aggregate_production(
        batches: &[ProductionBatch],
        orders: &[Order],
        settings: &Settings,
        fiscal_year: &str,
        month: &str,
    ) -> Result<ProductionMetrics, DashboardError> {
        let (period, range) = Self::resolve_period(settings, fiscal_year, month)?;
        let in_month: Vec<&ProductionBatch> =
            batches.iter().filter(|b| range.contains(b.date)).collect();

        let boxes_built: i64 = in_month.iter().map(|b| i64::from(b.boxes_built)).sum();
        let boxes_over_cost: i64 = in_month.iter().map(|b| i64::from(b.boxes_over_cost)).sum();
        let rework_boxes: i64 = in_month.iter().map(|b| i64::from(b.rework_boxes)).sum();
        let built = Decimal::from(boxes_built);

        let cost_compliance_pct = if boxes_built == 0 {
            Decimal::ONE_HUNDRED
        } else {
            Decimal::from(boxes_built - boxes_over_cost) / built * Decimal::ONE_HUNDRED
        };
        let rework_rate_pct = percent_of(Decimal::from(rework_boxes), built);

        let window = DateRange::trailing(range.end, ROLLING_WINDOW_DAYS);
        let rolling_built: i64 = batches
            .iter()
            .filter(|b| window.contains(b.date))
            .map(|b| i64::from(b.boxes_built))
            .sum();

        // Cumulative orders against this month's output only.
        let ordered_to_date: i64 = orders
            .iter()
            .filter(|o| o.date <= range.end)
            .map(|o| i64::from(o.boxes_qty))
            .sum();
        let backlog = ordered_to_date - boxes_built;

        let installed_boxes: i64 = orders
            .iter()
            .filter(|o| range.contains(o.date) && o.has_install())
            .map(|o| i64::from(o.boxes_qty))
            .sum();
        let rolling_installs: i64 = orders
            .iter()
            .filter(|o| window.contains(o.date) && o.has_install())
            .map(|o| i64::from(o.boxes_qty))
            .sum();
        let installs_per_week = per_week(rolling_installs);

        let statuses = ProductionStatuses {
            volume: classify(
                built,
                Decimal::from(period.monthly_box_target),
                settings.amber_floor_fraction,
            ),
            cost_compliance: classify_cost_compliance(cost_compliance_pct),
            quality: classify_quality(rework_rate_pct),
            install_pace: classify(
                installs_per_week,
                Decimal::from(settings.install_capacity_per_week),
                settings.amber_floor_fraction,
            ),
        };

        Ok(ProductionMetrics {
            period,
            boxes_built,
            boxes_over_cost,
            rework_boxes,
            cost_compliance_pct,
            rework_rate_pct,
            cost_leakage: Self::rank_leakage(&in_month),
            rolling_4wk_built_per_week: per_week(rolling_built),
            backlog,
            installs: InstallSummary {
                installed_boxes,
                installs_per_week,
                install_shape_pct: percent_of(Decimal::from(installed_boxes), built),
                capacity_per_week: settings.install_capacity_per_week,
            },
            statuses,
        })
    }

    /// Groups over-cost reasons by name and returns the top five by boxes.
    ///
    /// Ties are ordered by reason name.
    fn rank_leakage(batches: &[&ProductionBatch]) -> Vec<CostLeakageReason> {
        let mut grouped: HashMap<&str, (i64, i64)> = HashMap::new();
        for reason in batches.iter().flat_map(|b| b.over_cost_reasons.iter()) {
            let entry = grouped.entry(reason.reason.as_str()).or_insert((0, 0));
            entry.0 += i64::from(reason.boxes);
            entry.1 += 1;
        }

        let mut ranked: Vec<CostLeakageReason> = grouped
            .into_iter()
            .map(|(reason, (boxes, occurrences))| CostLeakageReason {
                reason: reason.to_string(),
                boxes,
                occurrences,
            })
            .collect();
        ranked.sort_by(|a, b| b.boxes.cmp(&a.boxes).then_with(|| a.reason.cmp(&b.reason)));
        ranked.truncate(TOP_LEAKAGE_REASONS);
        ranked
    }

    /// Resolves the fiscal month into period info and its date range.
    fn resolve_period(
        settings: &Settings,
        fiscal_year: &str,
        month: &str,
    ) -> Result<(PeriodInfo, DateRange), DashboardError> {
        let calendar = settings.calendar()?;
        let range = calendar.date_range_of(fiscal_year, month)?;
        let canonical = MONTH_NAMES[(calendar_month_of(month)? - 1) as usize];

        let period = PeriodInfo {
            fiscal_year: canonical_label(fiscal_year)?,
            month: canonical.to_string(),
            start_date: range.start,
            end_date: range.end,
            monthly_box_target: settings.monthly_box_target(canonical),
        };
        Ok((period, range))
    }
}

/// `part / whole * 100`, or 0 when `whole` is 0.
fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        part / whole * Decimal::ONE_HUNDRED
    }
}

/// `numerator / denominator`, or 0 when `denominator` is 0.
fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

fn per_week(total: i64) -> Decimal {
    Decimal::from(total) / Decimal::from(ROLLING_WINDOW_WEEKS)
}
