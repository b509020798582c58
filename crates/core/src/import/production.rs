//! Production batch CSV decoding.

use std::io::Read;

use csv::StringRecord;
use forgeboard_shared::ImportMode;
use forgeboard_shared::types::ProductionBatchId;

use super::error::{ImportError, RowError};
use super::fields::{
    Columns, RowProblems, parse_count, parse_date, parse_id, required, unreadable_row,
};
use super::types::{PlannedRow, ProductionImportPlan, RowAction};
use crate::records::{CreateProductionBatchInput, OverCostReason};

/// Columns a production file must have.
pub const PRODUCTION_REQUIRED_COLUMNS: [&str; 2] = ["date", "boxes_built"];

/// Accepted names for the reasons column, in lookup order.
const REASON_COLUMNS: [&str; 2] = ["over_cost_reasons", "reasons"];

/// Decodes a production CSV into an import plan.
///
/// # Errors
///
/// Returns `ImportError::MissingColumns` if the header lacks a required
/// column, or `ImportError::Csv` if the header or the underlying reader
/// fails. Rows that cannot be decoded are reported as row errors.
pub fn parse_production<R: Read>(
    reader: R,
    mode: ImportMode,
) -> Result<ProductionImportPlan, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let columns = Columns::from_headers(csv_reader.headers()?, &PRODUCTION_REQUIRED_COLUMNS)?;

    let mut plan = ProductionImportPlan {
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

        match decode_batch(&columns, &record, mode) {
            Ok(action) => plan.rows.push(PlannedRow { row, action }),
            Err(messages) => plan
                .errors
                .extend(messages.into_iter().map(|m| RowError::new(row, m))),
        }
    }

    Ok(plan)
}

fn decode_batch(
    columns: &Columns,
    record: &StringRecord,
    mode: ImportMode,
) -> Result<RowAction<ProductionBatchId, CreateProductionBatchInput>, Vec<String>> {
    let mut problems = RowProblems::default();

    let id = match mode {
        ImportMode::Upsert => problems
            .check(parse_id(columns.get(record, "id"), ProductionBatchId::positive))
            .flatten(),
        ImportMode::InsertOnly => None,
    };

    let date = problems.check(
        required(columns.get(record, "date"), "date").and_then(|v| parse_date(v, "date")),
    );
    let boxes_built = problems.check(
        required(columns.get(record, "boxes_built"), "boxes_built")
            .and_then(|v| parse_count(v, "boxes_built", 0)),
    );
    let boxes_over_cost = problems.check(optional_count(columns, record, "boxes_over_cost"));
    let rework_boxes = problems.check(optional_count(columns, record, "rework_boxes"));
    let over_cost_reasons =
        problems.check(parse_reasons(columns.get_any(record, &REASON_COLUMNS)));

    let (
        Some(date),
        Some(boxes_built),
        Some(boxes_over_cost),
        Some(rework_boxes),
        Some(over_cost_reasons),
    ) = (date, boxes_built, boxes_over_cost, rework_boxes, over_cost_reasons)
    else {
        return Err(problems.into_messages());
    };

    let messages = problems.into_messages();
    if !messages.is_empty() {
        return Err(messages);
    }

    let input = CreateProductionBatchInput {
        date,
        boxes_built,
        boxes_over_cost,
        over_cost_reasons,
        rework_boxes,
        notes: columns.get_text(record, "notes").map(str::to_string),
    };

    Ok(match id {
        Some(id) => RowAction::Update(id, input),
        None => RowAction::Insert(input),
    })
}

fn optional_count(columns: &Columns, record: &StringRecord, name: &str) -> Result<i32, String> {
    columns
        .get(record, name)
        .map_or(Ok(0), |v| parse_count(v, name, 0))
}

/// Parses the reasons cell. An empty cell means no reasons.
pub(crate) fn parse_reasons(value: Option<&str>) -> Result<Vec<OverCostReason>, String> {
    let Some(raw) = value else {
        return Ok(Vec::new());
    };

    let parsed: serde_json::Value =
        serde_json::from_str(raw).map_err(|_| "reasons must be valid JSON".to_string())?;
    if !parsed.is_array() {
        return Err("reasons must be a JSON array".to_string());
    }

    serde_json::from_value(parsed)
        .map_err(|_| "reasons entries must be objects with reason and boxes".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reasons() {
        assert_eq!(parse_reasons(None), Ok(Vec::new()));
        assert_eq!(parse_reasons(Some("[]")), Ok(Vec::new()));
        assert_eq!(
            parse_reasons(Some(r#"[{"reason":"Steel price","boxes":2}]"#)),
            Ok(vec![OverCostReason {
                reason: "Steel price".to_string(),
                boxes: 2
            }])
        );
        assert_eq!(
            parse_reasons(Some("{not json")),
            Err("reasons must be valid JSON".to_string())
        );
        assert_eq!(
            parse_reasons(Some(r#"{"reason":"x","boxes":1}"#)),
            Err("reasons must be a JSON array".to_string())
        );
        assert!(parse_reasons(Some(r#"["x"]"#)).is_err());
    }
}
