//! CSV row codec for orders and production batches.
//!
//! Import decodes a file into an [`ImportPlan`]: valid rows become inserts
//! or id-based updates, invalid rows become [`RowError`]s carrying their row
//! number. Only a missing required column stops a file outright. Applying
//! the plan is left to the persistence layer.
//!
//! Export writes records in a fixed column order and provides a template
//! file per record type.

pub mod error;
pub mod export;
pub mod fields;
pub mod orders;
pub mod production;
pub mod types;


pub use error::{ImportError, RowError};
pub use forgeboard_shared::ImportMode;
pub use export::{
    ORDER_EXPORT_COLUMNS, OrderExportRow, PRODUCTION_EXPORT_COLUMNS, export_filename,
    template_filename, write_order_template, write_orders, write_production,
    write_production_template,
};
pub use fields::{DATE_FORMAT, is_email_shaped};
pub use orders::{ORDER_REQUIRED_COLUMNS, SalesRepLookup, parse_orders};
pub use production::{PRODUCTION_REQUIRED_COLUMNS, parse_production};
pub use types::{
    ImportKind, ImportPlan, ImportSummary, OrderImportPlan, PlannedRow, ProductionImportPlan,
    RowAction,
};
