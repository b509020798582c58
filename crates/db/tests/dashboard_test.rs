//! Dashboard snapshot loading against a mocked connection.

use chrono::{DateTime, FixedOffset, NaiveDate};
use forgeboard_core::status::ThresholdStatus;
use forgeboard_db::DashboardRepository;
use forgeboard_db::entities::{orders, production_batches, settings};
use forgeboard_shared::types::UserId;
use rust_decimal::Decimal;
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::json;

fn stamp() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2025-10-01T08:00:00+00:00").unwrap()
}

fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, m, d).unwrap()
}

fn order(id: i64, date: NaiveDate, rep: i64, boxes: i32) -> orders::Model {
    orders::Model {
        id,
        date,
        reference: None,
        sales_rep_id: Some(rep),
        boxes_qty: boxes,
        rrp_total: Decimal::from(800 * boxes),
        net_total: Decimal::from(800 * boxes),
        build_cost_total: Decimal::from(100 * boxes),
        install_revenue: Decimal::ZERO,
        extras_revenue: Decimal::ZERO,
        notes: None,
        created_at: stamp(),
        updated_at: stamp(),
    }
}

fn batch(id: i64, date: NaiveDate, built: i32, over: i32) -> production_batches::Model {
    production_batches::Model {
        id,
        date,
        boxes_built: built,
        boxes_over_cost: over,
        over_cost_reasons: json!([{ "reason": "steel price", "boxes": over }]),
        rework_boxes: 0,
        notes: None,
        created_at: stamp(),
        updated_at: stamp(),
    }
}

#[tokio::test]
async fn test_sales_dashboard_uses_default_settings_and_rep_filter() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<settings::Model>::new()])
        .append_query_results([vec![
            order(1, day(10, 3), 7, 12),
            order(2, day(10, 20), 7, 10),
            order(3, day(10, 21), 8, 30),
        ]])
        .into_connection();
    let repo = DashboardRepository::new(db);

    let sales = repo
        .sales("2025/26", "October", Some(UserId::new(7)))
        .await
        .unwrap();

    assert_eq!(sales.period.month, "October");
    assert_eq!(sales.period.monthly_box_target, 20);
    assert_eq!(sales.boxes_sold, 22);
    assert_eq!(sales.shape.order_count, 2);
    assert_eq!(sales.statuses.volume, ThresholdStatus::OnTarget);
}

#[tokio::test]
async fn test_production_dashboard_reports_backlog_and_leakage() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<settings::Model>::new()])
        .append_query_results([vec![batch(1, day(10, 6), 10, 2), batch(2, day(10, 13), 8, 0)]])
        .append_query_results([vec![order(1, day(9, 15), 7, 20), order(2, day(10, 2), 8, 10)]])
        .into_connection();
    let repo = DashboardRepository::new(db);

    let production = repo.production("2025/26", "October").await.unwrap();

    assert_eq!(production.boxes_built, 18);
    assert_eq!(production.boxes_over_cost, 2);
    assert_eq!(production.backlog, 12);
    assert_eq!(production.cost_leakage.len(), 1);
    assert_eq!(production.cost_leakage[0].reason, "steel price");
    assert_eq!(production.cost_leakage[0].boxes, 2);
    assert_eq!(production.statuses.volume, ThresholdStatus::Watch);
}

#[tokio::test]
async fn test_unknown_month_is_rejected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<settings::Model>::new()])
        .into_connection();
    let repo = DashboardRepository::new(db);

    assert!(repo.sales("2025/26", "Brumaire", None).await.is_err());
}
