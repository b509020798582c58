//! CSV export and import templates.
//!
//! Export columns are a superset of the import columns, so an exported file
//! can be edited and imported back.

use std::io::Write;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use super::error::ImportError;
use super::fields::DATE_FORMAT;
use super::types::ImportKind;
use crate::records::{Order, ProductionBatch};

/// Column order of an orders export.
pub const ORDER_EXPORT_COLUMNS: [&str; 14] = [
    "id",
    "date",
    "reference",
    "sales_rep_email",
    "sales_rep_name",
    "boxes_qty",
    "rrp_total",
    "net_total",
    "build_cost_total",
    "install_revenue",
    "extras_revenue",
    "notes",
    "created_at",
    "updated_at",
];

/// Column order of a production export.
pub const PRODUCTION_EXPORT_COLUMNS: [&str; 9] = [
    "id",
    "date",
    "boxes_built",
    "boxes_over_cost",
    "over_cost_reasons",
    "rework_boxes",
    "notes",
    "created_at",
    "updated_at",
];

/// An order with its sales rep's details joined in by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderExportRow {
    /// The order.
    pub order: Order,
    /// Owning rep's email, if any.
    pub sales_rep_email: Option<String>,
    /// Owning rep's display name, if any.
    pub sales_rep_name: Option<String>,
}

/// Writes orders as CSV with a header row.
///
/// # Errors
///
/// Returns `ImportError::Csv` or `ImportError::Io` if writing fails.
pub fn write_orders<W: Write>(writer: W, rows: &[OrderExportRow]) -> Result<(), ImportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(ORDER_EXPORT_COLUMNS)?;

    for row in rows {
        let order = &row.order;
        csv_writer.write_record([
            order.id.to_string(),
            order.date.format(DATE_FORMAT).to_string(),
            text(order.reference.as_deref()),
            text(row.sales_rep_email.as_deref()),
            text(row.sales_rep_name.as_deref()),
            order.boxes_qty.to_string(),
            order.rrp_total.to_string(),
            order.net_total.to_string(),
            order.build_cost_total.to_string(),
            order.install_revenue.to_string(),
            order.extras_revenue.to_string(),
            text(order.notes.as_deref()),
            timestamp(order.created_at),
            timestamp(order.updated_at),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes production batches as CSV with a header row.
///
/// Reasons are written as a JSON array string.
///
/// # Errors
///
/// Returns `ImportError::Csv`, `ImportError::Io` or `ImportError::Json` if
/// writing fails.
pub fn write_production<W: Write>(
    writer: W,
    batches: &[ProductionBatch],
) -> Result<(), ImportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(PRODUCTION_EXPORT_COLUMNS)?;

    for batch in batches {
        csv_writer.write_record([
            batch.id.to_string(),
            batch.date.format(DATE_FORMAT).to_string(),
            batch.boxes_built.to_string(),
            batch.boxes_over_cost.to_string(),
            serde_json::to_string(&batch.over_cost_reasons)?,
            batch.rework_boxes.to_string(),
            text(batch.notes.as_deref()),
            timestamp(batch.created_at),
            timestamp(batch.updated_at),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes the orders header with one illustrative row.
///
/// # Errors
///
/// Returns `ImportError::Csv` or `ImportError::Io` if writing fails.
pub fn write_order_template<W: Write>(writer: W) -> Result<(), ImportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(ORDER_EXPORT_COLUMNS)?;
    csv_writer.write_record([
        "",
        "2025-07-14",
        "JOB-1042",
        "sales@example.com",
        "Sample Rep",
        "2",
        "2800.00",
        "2600.00",
        "1400.00",
        "300.00",
        "100.00",
        "Leave id empty to add a new order",
        "",
        "",
    ])?;
    csv_writer.flush()?;
    Ok(())
}

/// Writes the production header with one illustrative row.
///
/// # Errors
///
/// Returns `ImportError::Csv` or `ImportError::Io` if writing fails.
pub fn write_production_template<W: Write>(writer: W) -> Result<(), ImportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(PRODUCTION_EXPORT_COLUMNS)?;
    csv_writer.write_record([
        "",
        "2025-07-14",
        "20",
        "2",
        r#"[{"reason":"Material price","boxes":2}]"#,
        "1",
        "Leave id empty to add a new batch",
        "",
        "",
    ])?;
    csv_writer.flush()?;
    Ok(())
}

/// Filename for an export taken on `today`.
#[must_use]
pub fn export_filename(kind: ImportKind, today: NaiveDate) -> String {
    format!("{kind}_export_{}.csv", today.format(DATE_FORMAT))
}

/// Filename for an import template.
#[must_use]
pub fn template_filename(kind: ImportKind) -> String {
    format!("{kind}_import_template.csv")
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filenames() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        assert_eq!(
            export_filename(ImportKind::Orders, today),
            "orders_export_2026-03-09.csv"
        );
        assert_eq!(
            export_filename(ImportKind::Production, today),
            "production_export_2026-03-09.csv"
        );
        assert_eq!(
            template_filename(ImportKind::Production),
            "production_import_template.csv"
        );
    }
}
