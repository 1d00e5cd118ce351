//! Batch report: the verdict plus every record's annotations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::batch::InvestigationBatch;
use crate::checks::ConstraintChecks;
use crate::types::InvestigationRecord;
use crate::validator::InvestigationValidator;
use crate::ValidationError;

/// Annotations of one record after validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordReport {
    pub test_name: String,
    pub record_id: Option<String>,
    pub error_flag: bool,
    pub error_message: Option<String>,
    pub dropdown_expanded: bool,
}

impl From<&InvestigationRecord> for RecordReport {
    fn from(record: &InvestigationRecord) -> Self {
        Self {
            test_name: record.test_name.clone(),
            record_id: record.record_id.clone(),
            error_flag: record.error_flag,
            error_message: record.error_message.clone(),
            dropdown_expanded: record.dropdown_expanded,
        }
    }
}

/// Outcome of validating a whole batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub valid: bool,
    pub lab_technician: bool,
    pub community: bool,
    pub records: Vec<RecordReport>,
    pub validated_at: DateTime<Utc>,
}

impl BatchReport {
    /// Records whose error flag is cleared.
    pub fn flagged(&self) -> impl Iterator<Item = &RecordReport> {
        self.records.iter().filter(|r| !r.error_flag)
    }
}

impl<C: ConstraintChecks> InvestigationValidator<C> {
    /// Validate a loaded batch in place and summarize the result.
    pub fn validate_batch(
        &self,
        batch: &mut InvestigationBatch,
    ) -> Result<BatchReport, ValidationError> {
        let lab_technician = batch.lab_technician;
        let valid = self.validate(lab_technician, batch.records.as_deref_mut())?;

        let records = batch
            .records
            .iter()
            .flatten()
            .map(RecordReport::from)
            .collect();

        Ok(BatchReport {
            valid,
            lab_technician,
            community: self.is_community(),
            records,
            validated_at: Utc::now(),
        })
    }
}
