//! Field constraint checks.
//!
//! Each check is independent and answers one question about one entered
//! value:
//!
//! - **mandatory**: is a required value present and non-blank?
//! - **constraints**: does the value meet its length, range or exact-length
//!   constraint? (only one of the three ever applies)
//! - **unit**: was a unit selected when the field offers units?
//!
//! The constraint group sits behind [`ConstraintChecks`] so the validator can
//! be driven with an alternative implementation.

pub mod constraints;
pub mod mandatory;
pub mod unit;

use serde_json::Value;
use thiserror::Error;

use crate::types::FieldRule;

pub use constraints::check_constraints;
pub use mandatory::is_mandatory_invalid;
pub use unit::{unit_key, validate_unit};

/// Pass/fail result of a check, with the reason when it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub valid: bool,
    pub message: Option<String>,
}

impl Verdict {
    pub fn pass() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }

    pub fn is_pass(&self) -> bool {
        self.valid
    }
}

/// A constraint check could not reach a verdict.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("constraint check failed for field '{field_id}': {reason}")]
pub struct CheckFault {
    pub field_id: String,
    pub reason: String,
}

impl CheckFault {
    pub fn new(field_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            reason: reason.into(),
        }
    }
}

/// The length/range/content constraint group for free-text fields.
pub trait ConstraintChecks {
    /// Check `value` against the rule's length, range or exact-length
    /// constraint.
    fn check(&self, value: &Value, rule: &FieldRule) -> Result<Verdict, CheckFault>;
}

/// The built-in constraint group. Never faults.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardChecks;

impl ConstraintChecks for StandardChecks {
    fn check(&self, value: &Value, rule: &FieldRule) -> Result<Verdict, CheckFault> {
        Ok(check_constraints(value, rule))
    }
}
