//! Order CSV decoding.

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::io::Read;

use csv::StringRecord;
use forgeboard_shared::ImportMode;
use forgeboard_shared::types::{OrderId, UserId};
use rust_decimal::Decimal;

use super::error::{ImportError, RowError};
use super::fields::{
    Columns, RowProblems, is_email_shaped, parse_count, parse_date, parse_decimal, parse_id,
    required, unreadable_row,
};
use super::types::{OrderImportPlan, PlannedRow, RowAction};
use crate::records::CreateOrderInput;

/// Columns an orders file must have.
pub const ORDER_REQUIRED_COLUMNS: [&str; 5] =
    ["date", "boxes_qty", "rrp_total", "net_total", "build_cost_total"];

/// Resolves a sales rep's email to their account.
///
/// Implementations return `None` for unknown emails and for accounts that do
/// not hold the sales role. Comparison ignores ASCII case.
pub trait SalesRepLookup {
    /// Looks up the sales account owning `email`.
    fn sales_rep_id(&self, email: &str) -> Option<UserId>;
}

impl<S: BuildHasher> SalesRepLookup for HashMap<String, UserId, S> {
    fn sales_rep_id(&self, email: &str) -> Option<UserId> {
        self.get(email)
            .or_else(|| {
                self.iter()
                    .find(|(known, _)| known.eq_ignore_ascii_case(email))
                    .map(|(_, id)| id)
            })
            .copied()
    }
}

/// Decodes an orders CSV into an import plan.
///
/// Every row is validated independently; failures are collected with their
/// row number and never stop the file.
///
/// # Errors
///
/// Returns `ImportError::MissingColumns` if the header lacks a required
/// column, or `ImportError::Csv` if the header or the underlying reader
/// fails. Rows that cannot be decoded are reported as row errors.
pub fn parse_orders<R, L>(
    reader: R,
    mode: ImportMode,
    reps: &L,
) -> Result<OrderImportPlan, ImportError>
where
    R: Read,
    L: SalesRepLookup + ?Sized,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let columns = Columns::from_headers(csv_reader.headers()?, &ORDER_REQUIRED_COLUMNS)?;

    let mut plan = OrderImportPlan {
        total: 0,
        rows: Vec::new(),
        errors: Vec::new(),
    };

    for (index, result) in csv_reader.records().enumerate() {
        let row = index + 2;
        plan.total += 1;
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                plan.errors.push(RowError::new(row, unreadable_row(err)?));
                continue;
            }
        };

        match decode_order(&columns, &record, mode, reps) {
            Ok(action) => plan.rows.push(PlannedRow { row, action }),
            Err(messages) => plan
                .errors
                .extend(messages.into_iter().map(|m| RowError::new(row, m))),
        }
    }

    Ok(plan)
}

fn decode_order<L: SalesRepLookup + ?Sized>(
    columns: &Columns,
    record: &StringRecord,
    mode: ImportMode,
    reps: &L,
) -> Result<RowAction<OrderId, CreateOrderInput>, Vec<String>> {
    let mut problems = RowProblems::default();

    let id = match mode {
        ImportMode::Upsert => problems
            .check(parse_id(columns.get(record, "id"), OrderId::positive))
            .flatten(),
        ImportMode::InsertOnly => None,
    };

    let date = problems.check(
        required(columns.get(record, "date"), "date").and_then(|v| parse_date(v, "date")),
    );
    let boxes_qty = problems.check(
        required(columns.get(record, "boxes_qty"), "boxes_qty")
            .and_then(|v| parse_count(v, "boxes_qty", 1)),
    );
    let rrp_total = problems.check(money(columns, record, "rrp_total"));
    let net_total = problems.check(money(columns, record, "net_total"));
    let build_cost_total = problems.check(money(columns, record, "build_cost_total"));
    let install_revenue = problems.check(optional_money(columns, record, "install_revenue"));
    let extras_revenue = problems.check(optional_money(columns, record, "extras_revenue"));

    let sales_rep_id = match columns.get(record, "sales_rep_email") {
        None => Some(None),
        Some(email) if !is_email_shaped(email) => {
            problems.push(format!("sales_rep_email is not a valid email address: '{email}'"));
            None
        }
        Some(email) => match reps.sales_rep_id(email) {
            Some(id) => Some(Some(id)),
            None => {
                problems.push(format!("Sales rep not found: {email}"));
                None
            }
        },
    };

    let (
        Some(date),
        Some(boxes_qty),
        Some(rrp_total),
        Some(net_total),
        Some(build_cost_total),
        Some(install_revenue),
        Some(extras_revenue),
        Some(sales_rep_id),
    ) = (
        date,
        boxes_qty,
        rrp_total,
        net_total,
        build_cost_total,
        install_revenue,
        extras_revenue,
        sales_rep_id,
    )
    else {
        return Err(problems.into_messages());
    };

    let messages = problems.into_messages();
    if !messages.is_empty() {
        return Err(messages);
    }

    let input = CreateOrderInput {
        date,
        reference: columns.get_text(record, "reference").map(str::to_string),
        sales_rep_id,
        boxes_qty,
        rrp_total,
        net_total,
        build_cost_total,
        install_revenue,
        extras_revenue,
        notes: columns.get_text(record, "notes").map(str::to_string),
    };

    Ok(match id {
        Some(id) => RowAction::Update(id, input),
        None => RowAction::Insert(input),
    })
}

fn money(columns: &Columns, record: &StringRecord, name: &str) -> Result<Decimal, String> {
    required(columns.get(record, name), name).and_then(|v| parse_decimal(v, name))
}

fn optional_money(columns: &Columns, record: &StringRecord, name: &str) -> Result<Decimal, String> {
    columns
        .get(record, name)
        .map_or(Ok(Decimal::ZERO), |v| parse_decimal(v, name))
}
