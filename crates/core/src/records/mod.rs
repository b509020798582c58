//! Sales order and production batch records.
//!
//! These are the already-validated rows the aggregation engine consumes and
//! the CSV codec produces.

pub mod types;

pub use types::{
    CreateOrderInput, CreateProductionBatchInput, Order, OverCostReason, ProductionBatch,
};
