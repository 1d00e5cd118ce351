//! Batch parsing from YAML/JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::schema::validate_batch_schema;
use crate::config::is_json;
use crate::types::InvestigationRecord;

/// Errors that can occur when loading batches or configuration.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Batch does not match schema: {}", .0.join("; "))]
    Schema(Vec<String>),
}

/// A batch of investigation records as submitted by a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvestigationBatch {
    /// Role of the submitting user
    #[serde(default)]
    pub lab_technician: bool,

    /// `None` when the client had nothing to send
    #[serde(default)]
    pub records: Option<Vec<InvestigationRecord>>,
}

impl InvestigationBatch {
    pub fn new(lab_technician: bool, records: Vec<InvestigationRecord>) -> Self {
        Self {
            lab_technician,
            records: Some(records),
        }
    }

    /// Parse a batch from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, BatchError> {
        let value: serde_json::Value = serde_yaml::from_str(yaml)?;
        Self::from_value(value)
    }

    /// Parse a batch from JSON string.
    pub fn from_json(json: &str) -> Result<Self, BatchError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Load a batch file; `.json` files are read as JSON, anything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BatchError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        if is_json(path) {
            Self::from_json(&contents)
        } else {
            Self::from_yaml(&contents)
        }
    }

    /// Schema-check a parsed value, then deserialize it.
    pub fn from_value(value: serde_json::Value) -> Result<Self, BatchError> {
        validate_batch_schema(&value).map_err(BatchError::Schema)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Number of records, zero when absent.
    pub fn len(&self) -> usize {
        self.records.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
