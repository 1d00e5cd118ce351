//! JSON Schema validation for batch files.
//!
//! Batches are validated against spec/investigation_batch.schema.json before
//! they are deserialized, so shape errors are reported with their location.

use std::sync::OnceLock;
use thiserror::Error;

/// Embedded batch schema (loaded at compile time).
pub const BATCH_SCHEMA_JSON: &str = include_str!("../../../../spec/investigation_batch.schema.json");

/// Compiled JSON Schema validator (initialized once, reused).
static COMPILED_SCHEMA: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

/// Errors from schema validation.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to load schema: {0}")]
    LoadError(String),
}

fn get_validator() -> Result<&'static jsonschema::Validator, SchemaError> {
    let result = COMPILED_SCHEMA.get_or_init(|| {
        let schema_value: serde_json::Value = serde_json::from_str(BATCH_SCHEMA_JSON)
            .map_err(|e| format!("Invalid schema JSON: {}", e))?;

        jsonschema::options()
            .build(&schema_value)
            .map_err(|e| format!("Failed to compile schema: {}", e))
    });

    result
        .as_ref()
        .map_err(|e| SchemaError::LoadError(e.clone()))
}

/// Validate a batch JSON value against the schema.
///
/// # Returns
///
/// * `Ok(())` - Batch is well-formed
/// * `Err(Vec<String>)` - One message per violation, with its instance path
pub fn validate_batch_schema(batch_json: &serde_json::Value) -> Result<(), Vec<String>> {
    let validator = get_validator().map_err(|e| vec![e.to_string()])?;

    let errors: Vec<String> = validator
        .iter_errors(batch_json)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
