//! # labform-core
//!
//! Deterministic validation of investigation (lab-test) records against the
//! form-layout rules they were entered through.
//!
//! For each record and each declared field this crate decides whether the
//! entered data satisfies:
//! - mandatoriness
//! - minimum length
//! - numeric range
//! - exact content length
//! - unit selection
//!
//! and annotates the record with an error message and error flag.
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same batch always produces the same verdict and annotations
//! 2. **Fail-closed**: A check that cannot decide fails its field, never the caller
//! 3. **Annotate only**: Records are never added, removed or stripped of values
//!
//! ## Example
//!
//! ```rust,ignore
//! use labform_core::{FieldRule, InvestigationRecord, InvestigationValidator};
//!
//! let mut records = vec![InvestigationRecord::new("Glucose", "Dr. Ada", "2024-01-01")
//!     .with_values([("glucose".to_string(), "5.0".into())].into())
//!     .with_rules(vec![FieldRule::free_text("glucose", "Glucose").with_min_value(10.0)])];
//!
//! let validator = InvestigationValidator::new(false);
//! let valid = validator.validate(false, Some(&mut records[..]))?;
//!
//! assert!(!valid);
//! assert_eq!(
//!     records[0].error_message.as_deref(),
//!     Some("Minimum value required: 10.0 (Glucose)")
//! );
//! ```

pub mod batch;
pub mod checks;
pub mod coercion;
pub mod config;
pub mod report;
pub mod types;
pub mod validator;

// Re-export main types at crate root
pub use batch::{BatchError, InvestigationBatch};
pub use checks::{CheckFault, ConstraintChecks, StandardChecks, Verdict};
pub use config::ValidatorConfig;
pub use report::{BatchReport, RecordReport};
pub use types::{
    Annotation, EnteredValues, FieldKind, FieldRule, FormResponse, InvestigationRecord,
    MessageUpdate,
};
pub use validator::{
    FieldOutcome, InvestigationValidator, CHECK_FAULT_MESSAGE, REQUIRED_DATA_MESSAGE,
};

use thiserror::Error;

/// The only error `validate` surfaces to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Validation failed: {0}")]
    Failed(String),
}

/// Structural problems found while walking a batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationFault {
    #[error("malformed form response: {0}")]
    Structure(String),
}

/// Validate a batch with a default validator.
///
/// # Arguments
///
/// * `community` - Community mode: lab technicians must always enter data
/// * `lab_technician` - Whether the caller is a lab technician
/// * `records` - The batch, or `None` when nothing could be loaded
pub fn validate(
    community: bool,
    lab_technician: bool,
    records: Option<&mut [InvestigationRecord]>,
) -> Result<bool, ValidationError> {
    InvestigationValidator::new(community).validate(lab_technician, records)
}
