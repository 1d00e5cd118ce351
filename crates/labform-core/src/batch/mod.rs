//! Batch loading and structural validation.
//!
//! Batch files are YAML or JSON, checked against an embedded JSON Schema
//! before being deserialized into records.

mod parser;
mod schema;

pub use parser::{BatchError, InvestigationBatch};
pub use schema::{validate_batch_schema, BATCH_SCHEMA_JSON};
